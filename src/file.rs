use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Surface model used by the lit shader for a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialType {
    Rocky,
    Gas,
}

impl FromStr for MaterialType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rocky" => Ok(MaterialType::Rocky),
            "gas" => Ok(MaterialType::Gas),
            _ => Err(format!("unknown material type {:?}", s)),
        }
    }
}

/// One row of the planet table, still in table units (orbit radius in AU-ish
/// units, speeds in degrees per second before scaling).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetDescriptor {
    pub name: String,
    pub orbit_speed: f32,
    pub orbit_radius: f32,
    pub size: f32,
    pub texture: PathBuf,
    pub rotation_speed: f32,
    pub material: MaterialType,
}

/// What to do with a row that can't be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Log it and keep going.
    Lenient,
    /// Fail the whole table.
    Strict,
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    Row { line: usize, reason: String },
}

const NUM_FIELDS: usize = 7;

/// Parses the planet table.
///
/// The first line is a header and is always skipped, as are blank lines. Fields
/// are comma-separated and trimmed. Columns are
/// `name,orbitSpeed,orbitRadius,size,texture,rotationSpeed,type`.
/// An unknown `type` isn't fatal: the row is kept as a rocky planet.
pub fn parse_planets(text: &str, mode: ParseMode) -> Result<Vec<PlanetDescriptor>, DataError> {
    let mut planets = vec![];

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line_number = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Ok(planet) => planets.push(planet),
            Err(reason) => match mode {
                ParseMode::Strict => {
                    return Err(DataError::Row {
                        line: line_number,
                        reason,
                    })
                }
                ParseMode::Lenient => {
                    log::warn!("Skipping planet table line {}: {}", line_number, reason);
                }
            },
        }
    }

    Ok(planets)
}

pub fn read_planets(path: &Path, mode: ParseMode) -> Result<Vec<PlanetDescriptor>, DataError> {
    let text = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_owned(),
        source,
    })?;
    let planets = parse_planets(&text, mode)?;
    log::info!("Read {} planets from {}", planets.len(), path.display());
    Ok(planets)
}

fn parse_row(line: &str) -> Result<PlanetDescriptor, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != NUM_FIELDS {
        return Err(format!(
            "expected {} fields, found {}",
            NUM_FIELDS,
            fields.len()
        ));
    }

    let name = fields[0];
    if name.is_empty() {
        return Err("empty name".to_owned());
    }

    let number = |column: &str, value: &str| -> Result<f32, String> {
        value
            .parse::<f32>()
            .ok()
            .filter(|x| x.is_finite())
            .ok_or_else(|| format!("bad {} {:?}", column, value))
    };
    let positive = |column: &str, value: &str| -> Result<f32, String> {
        let x = number(column, value)?;
        if x > 0.0 {
            Ok(x)
        } else {
            Err(format!("{} must be positive, was {}", column, x))
        }
    };

    let material = fields[6].parse().unwrap_or_else(|err| {
        log::warn!("{}: {}, treating it as rocky", name, err);
        MaterialType::Rocky
    });

    Ok(PlanetDescriptor {
        name: name.to_owned(),
        orbit_speed: number("orbitSpeed", fields[1])?,
        orbit_radius: number("orbitRadius", fields[2])?,
        size: positive("size", fields[3])?,
        texture: PathBuf::from(fields[4]),
        rotation_speed: number("rotationSpeed", fields[5])?,
        material,
    })
}

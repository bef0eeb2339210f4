//! GLSL sources for the four programs in `render::ShaderProgram`.
//!
//! Spheres carry no texture coordinates; the fragment shaders derive them from
//! the interpolated object-space normal (longitude around Y, latitude from Y).

use crate::render::ShaderProgram;

pub fn sources(program: ShaderProgram) -> (&'static str, &'static str) {
    match program {
        ShaderProgram::Unlit => (UNLIT_VERTEX_SRC, UNLIT_FRAGMENT_SRC),
        ShaderProgram::Lit => (LIT_VERTEX_SRC, LIT_FRAGMENT_SRC),
        ShaderProgram::Ring => (RING_VERTEX_SRC, RING_FRAGMENT_SRC),
        ShaderProgram::Orbit => (ORBIT_VERTEX_SRC, ORBIT_FRAGMENT_SRC),
    }
}

static UNLIT_VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 normal;
    varying   vec3 vLocalNormal;
    uniform   mat4 model;
    uniform   mat4 view;
    uniform   mat4 projection;
    void main() {
        vLocalNormal = normal;
        gl_Position = projection * view * model * vec4(position, 1.0);
    }";

static UNLIT_FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 vLocalNormal;
    uniform sampler2D texture1;

    vec2 sphereUv(vec3 n) {
        float u = 0.5 - atan(n.z, n.x) / 6.28318530718;
        float v = 0.5 - asin(clamp(n.y, -1.0, 1.0)) / 3.14159265359;
        return vec2(u, v);
    }

    void main() {
        gl_FragColor = texture2D(texture1, sphereUv(normalize(vLocalNormal)));
    }";

static LIT_VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec3 normal;
    varying   vec3 vLocalNormal;
    varying   vec3 vWorldNormal;
    varying   vec3 vWorldPos;
    uniform   mat4 model;
    uniform   mat4 view;
    uniform   mat4 projection;
    void main() {
        vec4 worldPos = model * vec4(position, 1.0);
        vWorldPos = worldPos.xyz;
        // model is a rigid transform, so it can rotate normals directly
        vWorldNormal = (model * vec4(normal, 0.0)).xyz;
        vLocalNormal = normal;
        gl_Position = projection * view * worldPos;
    }";

static LIT_FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec3 vLocalNormal;
    varying vec3 vWorldNormal;
    varying vec3 vWorldPos;

    uniform sampler2D texture1;
    uniform vec3 sunPos;
    uniform vec3 viewPos;
    uniform vec3 light_La;
    uniform vec3 light_Ld;
    uniform vec3 light_Le;
    uniform vec3 material_Ka;
    uniform vec3 material_Kd;
    uniform vec3 material_Ks;
    uniform float material_shininess;

    vec2 sphereUv(vec3 n) {
        float u = 0.5 - atan(n.z, n.x) / 6.28318530718;
        float v = 0.5 - asin(clamp(n.y, -1.0, 1.0)) / 3.14159265359;
        return vec2(u, v);
    }

    void main() {
        vec3 albedo = texture2D(texture1, sphereUv(normalize(vLocalNormal))).rgb;

        vec3 n = normalize(vWorldNormal);
        vec3 toLight = normalize(sunPos - vWorldPos);
        vec3 toEye = normalize(viewPos - vWorldPos);

        float lambert = max(dot(n, toLight), 0.0);
        float specular = 0.0;
        if (lambert > 0.0) {
            vec3 reflected = reflect(-toLight, n);
            specular = pow(max(dot(toEye, reflected), 0.0), material_shininess);
        }

        vec3 color = light_La * material_Ka * albedo
                   + light_Ld * material_Kd * lambert * albedo
                   + light_Le * material_Ks * specular;
        gl_FragColor = vec4(color, 1.0);
    }";

static RING_VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    attribute vec2 tex_coord;
    varying   vec2 vTexCoord;
    uniform   mat4 model;
    uniform   mat4 view;
    uniform   mat4 projection;
    void main() {
        vTexCoord = tex_coord;
        gl_Position = projection * view * model * vec4(position, 1.0);
    }";

static RING_FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    varying vec2 vTexCoord;
    uniform sampler2D texture1;
    void main() {
        vec4 color = texture2D(texture1, vTexCoord);
        if (color.a < 0.01) {
            discard;
        }
        gl_FragColor = color;
    }";

static ORBIT_VERTEX_SRC: &str = "#version 100
    attribute vec3 position;
    uniform   mat4 model;
    uniform   mat4 view;
    uniform   mat4 projection;
    void main() {
        gl_Position = projection * view * model * vec4(position, 1.0);
    }";

static ORBIT_FRAGMENT_SRC: &str = "#version 100
#ifdef GL_FRAGMENT_PRECISION_HIGH
   precision highp float;
#else
   precision mediump float;
#endif

    uniform vec3 color;
    void main() {
        gl_FragColor = vec4(color, 1.0);
    }";

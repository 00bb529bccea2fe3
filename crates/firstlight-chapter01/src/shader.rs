/// Vertex entry point: passes the attribute-0 position through as clip space.
pub const VERTEX_FUNCTION: &str = "vertex_main";

/// Fragment entry point: constant red.
pub const FRAGMENT_FUNCTION: &str = "fragment_main";

pub const SHADER_SOURCE: &str = r#"
struct VertexIn {
    @location(0) position: vec3<f32>,
};

@vertex
fn vertex_main(vertex_in: VertexIn) -> @builtin(position) vec4<f32> {
    return vec4<f32>(vertex_in.position, 1.0);
}

@fragment
fn fragment_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use firstlight_engine::shader::{ShaderInterface, ShaderStage};

    #[test]
    fn exposes_one_vertex_and_one_fragment_entry_point() {
        let iface = ShaderInterface::parse("chapter01", SHADER_SOURCE).unwrap();

        let names = |stage| {
            iface
                .stage(stage)
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
        };
        let vertex = names(ShaderStage::Vertex);
        let fragment = names(ShaderStage::Fragment);

        assert_eq!(vertex, [VERTEX_FUNCTION]);
        assert_eq!(fragment, [FRAGMENT_FUNCTION]);
        assert_eq!(iface.entry_points().len(), 2);
    }
}

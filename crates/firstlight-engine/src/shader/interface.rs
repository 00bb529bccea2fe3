use anyhow::{anyhow, Result};
use wgpu::naga;

use crate::Abort;

/// Pipeline stage an entry point runs in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
    /// Task/mesh stages; not usable by render pipelines here.
    Other,
}

impl From<naga::ShaderStage> for ShaderStage {
    fn from(stage: naga::ShaderStage) -> Self {
        match stage {
            naga::ShaderStage::Vertex => ShaderStage::Vertex,
            naga::ShaderStage::Fragment => ShaderStage::Fragment,
            naga::ShaderStage::Compute => ShaderStage::Compute,
            #[allow(unreachable_patterns)]
            _ => ShaderStage::Other,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct EntryPoint {
    pub name: String,
    pub stage: ShaderStage,
}

/// Parsed and validated shader source. Needs no device.
#[derive(Debug, Clone)]
pub struct ShaderInterface {
    label: String,
    module: naga::Module,
    entry_points: Vec<EntryPoint>,
}

impl ShaderInterface {
    /// Parses and validates WGSL `source`.
    ///
    /// Diagnostics are rendered against the source and carried in the error.
    pub fn parse(label: &str, source: &str) -> Result<Self> {
        let module = naga::front::wgsl::parse_str(source).map_err(|e| {
            anyhow!("{label}: {}", e.emit_to_string(source)).context(Abort::ShaderCompilation)
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| {
            anyhow!("{label}: {}", e.emit_to_string(source)).context(Abort::ShaderCompilation)
        })?;

        let entry_points = module
            .entry_points
            .iter()
            .map(|ep| EntryPoint {
                name: ep.name.clone(),
                stage: ep.stage.into(),
            })
            .collect();

        Ok(Self {
            label: label.to_string(),
            module,
            entry_points,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    pub fn entry_point(&self, name: &str) -> Option<&EntryPoint> {
        self.entry_points.iter().find(|ep| ep.name == name)
    }

    /// Entry points of one stage, in declaration order.
    pub fn stage(&self, stage: ShaderStage) -> impl Iterator<Item = &EntryPoint> {
        self.entry_points.iter().filter(move |ep| ep.stage == stage)
    }

    pub(super) fn module(&self) -> &naga::Module {
        &self.module
    }
}

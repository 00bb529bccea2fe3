use std::borrow::Cow;

use anyhow::{anyhow, Result};

use crate::Abort;

use super::interface::{EntryPoint, ShaderInterface, ShaderStage};

/// Compiled shader module plus its reflected entry points. Owned by the device.
#[derive(Debug)]
pub struct ShaderLibrary {
    interface: ShaderInterface,
    module: wgpu::ShaderModule,
}

impl ShaderLibrary {
    /// Compiles `source`. Fails before touching the device if the source is invalid.
    pub fn new(device: &wgpu::Device, label: &str, source: &str) -> Result<Self> {
        let interface = ShaderInterface::parse(label, source)?;

        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(interface.module().clone())),
        });
        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(anyhow!("shader '{label}': {err}").context(Abort::ShaderCompilation));
        }

        log::debug!(
            "shader library '{label}': entry points [{}]",
            interface
                .entry_points()
                .iter()
                .map(|ep| format!("{} ({:?})", ep.name, ep.stage))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self { interface, module })
    }

    /// Looks up a function by entry point name.
    pub fn make_function(&self, name: &str) -> Option<ShaderFunction> {
        self.interface.entry_point(name).map(|ep| ShaderFunction {
            module: self.module.clone(),
            entry: ep.clone(),
        })
    }
}

/// One entry point of a compiled library.
#[derive(Debug, Clone)]
pub struct ShaderFunction {
    module: wgpu::ShaderModule,
    entry: EntryPoint,
}

impl ShaderFunction {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn stage(&self) -> ShaderStage {
        self.entry.stage
    }

    pub fn entry(&self) -> &EntryPoint {
        &self.entry
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}

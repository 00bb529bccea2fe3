//! Fatal abort reasons.
//!
//! Every fallible setup step attaches one of these as `anyhow` context. The
//! failure model has no recovery: the reason is logged and the process ends.

use std::fmt;

/// Fixed reason attached to a fatal setup or submission failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Abort {
    GpuUnsupported,
    CommandQueue,
    Surface,
    MeshGeneration,
    ShaderCompilation,
    MissingFunction,
    PipelineState,
    Drawable,
    NoSubmesh,
    FrameScript,
}

impl Abort {
    /// Fixed, user-facing reason string.
    pub const fn reason(self) -> &'static str {
        match self {
            Abort::GpuUnsupported => "GPU is not supported",
            Abort::CommandQueue => "Could not create a command queue",
            Abort::Surface => "Could not create a drawable surface",
            Abort::MeshGeneration => "Could not generate mesh",
            Abort::ShaderCompilation => "Could not compile shader library",
            Abort::MissingFunction => "Shader function not found in library",
            Abort::PipelineState => "Could not create render pipeline state",
            Abort::Drawable => "Could not acquire a drawable",
            Abort::NoSubmesh => "Mesh has no submesh",
            Abort::FrameScript => "Frame command sequence is invalid",
        }
    }

    /// Finds the abort reason attached anywhere in an error chain.
    pub fn of(err: &anyhow::Error) -> Option<Abort> {
        err.downcast_ref::<Abort>().copied()
    }
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl std::error::Error for Abort {}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn display_is_fixed_reason() {
        assert_eq!(Abort::GpuUnsupported.to_string(), "GPU is not supported");
        assert_eq!(Abort::CommandQueue.to_string(), "Could not create a command queue");
    }

    #[test]
    fn recovers_reason_from_plain_error() {
        let err = anyhow::Error::new(Abort::NoSubmesh);
        assert_eq!(Abort::of(&err), Some(Abort::NoSubmesh));
    }

    #[test]
    fn recovers_reason_under_outer_context() {
        let res: anyhow::Result<()> = Err(anyhow::anyhow!("adapter request returned nothing"))
            .context(Abort::GpuUnsupported)
            .context("device acquisition");
        let err = res.unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::GpuUnsupported));
        assert_eq!(err.to_string(), "device acquisition");
    }

    #[test]
    fn no_reason_when_absent() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(Abort::of(&err), None);
    }

    #[test]
    fn reasons_are_distinct() {
        let all = [
            Abort::GpuUnsupported,
            Abort::CommandQueue,
            Abort::Surface,
            Abort::MeshGeneration,
            Abort::ShaderCompilation,
            Abort::MissingFunction,
            Abort::PipelineState,
            Abort::Drawable,
            Abort::NoSubmesh,
            Abort::FrameScript,
        ];
        let unique: std::collections::HashSet<_> = all.iter().map(|a| a.reason()).collect();
        assert_eq!(unique.len(), all.len());
    }
}

use std::fmt;

use anyhow::{anyhow, Result};

use crate::mesh::MeshSummary;
use crate::Abort;

/// One recorded step of a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommand {
    /// Open the render pass on the current drawable (clears it).
    BeginPass,
    SetPipeline,
    SetVertexBuffer {
        slot: u32,
        buffer: usize,
    },
    DrawIndexed {
        submesh: usize,
        index_count: u32,
        index_format: wgpu::IndexFormat,
    },
    EndPass,
    /// Schedule the drawable for presentation once the commands are committed.
    Present,
    Commit,
}

/// Ordering violation in a frame script. Indices point into the command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    NoPass,
    MultiplePasses(usize),
    OutsidePass(usize),
    PipelineNotSet(usize),
    VertexBufferNotSet(usize),
    UnclosedPass,
    NoDraw,
    PresentBeforeEndPass(usize),
    PresentCount(usize),
    AfterCommit(usize),
    MissingCommit,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::NoPass => write!(f, "frame never opens a render pass"),
            ScriptError::MultiplePasses(i) => write!(f, "command {i}: second render pass"),
            ScriptError::OutsidePass(i) => write!(f, "command {i}: encoder command outside a pass"),
            ScriptError::PipelineNotSet(i) => write!(f, "command {i}: pipeline state not bound"),
            ScriptError::VertexBufferNotSet(i) => write!(f, "command {i}: vertex buffer not bound"),
            ScriptError::UnclosedPass => write!(f, "render pass is never ended"),
            ScriptError::NoDraw => write!(f, "frame issues no draw call"),
            ScriptError::PresentBeforeEndPass(i) => {
                write!(f, "command {i}: present before the pass ends")
            }
            ScriptError::PresentCount(n) => write!(f, "frame presents {n} times, expected once"),
            ScriptError::AfterCommit(i) => write!(f, "command {i}: recorded after commit"),
            ScriptError::MissingCommit => write!(f, "frame is never committed"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Ordered command list for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameScript {
    commands: Vec<RenderCommand>,
}

impl FrameScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: RenderCommand) -> &mut Self {
        self.commands.push(cmd);
        self
    }

    /// Records the canonical frame: bind, draw the first submesh once, present, commit.
    pub fn single_draw(mesh: &MeshSummary) -> Result<Self> {
        if mesh.vertex_buffers == 0 {
            return Err(anyhow!("mesh has no vertex buffer").context(Abort::MeshGeneration));
        }
        let sub = mesh.submeshes.first().ok_or(Abort::NoSubmesh)?;

        let mut script = Self::new();
        script
            .push(RenderCommand::BeginPass)
            .push(RenderCommand::SetPipeline)
            .push(RenderCommand::SetVertexBuffer { slot: 0, buffer: 0 })
            .push(RenderCommand::DrawIndexed {
                submesh: 0,
                index_count: sub.index_count,
                index_format: sub.index_format,
            })
            .push(RenderCommand::EndPass)
            .push(RenderCommand::Present)
            .push(RenderCommand::Commit);
        Ok(script)
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn draw_count(&self) -> usize {
        self.count(|c| matches!(c, RenderCommand::DrawIndexed { .. }))
    }

    pub fn present_count(&self) -> usize {
        self.count(|c| matches!(c, RenderCommand::Present))
    }

    fn count(&self, pred: impl Fn(&RenderCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Commands recorded inside the render pass, delimiters excluded.
    pub fn pass_commands(&self) -> &[RenderCommand] {
        let begin = self.commands.iter().position(|c| *c == RenderCommand::BeginPass);
        let end = self.commands.iter().position(|c| *c == RenderCommand::EndPass);
        match (begin, end) {
            (Some(b), Some(e)) if b < e => &self.commands[b + 1..e],
            _ => &[],
        }
    }

    /// Checks the ordering invariant.
    ///
    /// One pass; pipeline bound before vertex buffers, both before any draw; draws
    /// only inside the pass; exactly one present after the pass; commit last.
    pub fn validate(&self) -> std::result::Result<(), ScriptError> {
        let mut pass_seen = false;
        let mut in_pass = false;
        let mut ended = false;
        let mut pipeline_set = false;
        let mut vertex_buffer_set = false;
        let mut draws = 0usize;
        let mut presents = 0usize;
        let mut committed = false;

        for (i, cmd) in self.commands.iter().enumerate() {
            if committed {
                return Err(ScriptError::AfterCommit(i));
            }

            match cmd {
                RenderCommand::BeginPass => {
                    if pass_seen {
                        return Err(ScriptError::MultiplePasses(i));
                    }
                    pass_seen = true;
                    in_pass = true;
                }
                RenderCommand::SetPipeline => {
                    if !in_pass {
                        return Err(ScriptError::OutsidePass(i));
                    }
                    pipeline_set = true;
                }
                RenderCommand::SetVertexBuffer { .. } => {
                    if !in_pass {
                        return Err(ScriptError::OutsidePass(i));
                    }
                    if !pipeline_set {
                        return Err(ScriptError::PipelineNotSet(i));
                    }
                    vertex_buffer_set = true;
                }
                RenderCommand::DrawIndexed { .. } => {
                    if !in_pass {
                        return Err(ScriptError::OutsidePass(i));
                    }
                    if !pipeline_set {
                        return Err(ScriptError::PipelineNotSet(i));
                    }
                    if !vertex_buffer_set {
                        return Err(ScriptError::VertexBufferNotSet(i));
                    }
                    draws += 1;
                }
                RenderCommand::EndPass => {
                    if !in_pass {
                        return Err(ScriptError::OutsidePass(i));
                    }
                    in_pass = false;
                    ended = true;
                }
                RenderCommand::Present => {
                    if !ended {
                        return Err(ScriptError::PresentBeforeEndPass(i));
                    }
                    presents += 1;
                }
                RenderCommand::Commit => committed = true,
            }
        }

        if !pass_seen {
            return Err(ScriptError::NoPass);
        }
        if in_pass {
            return Err(ScriptError::UnclosedPass);
        }
        if draws == 0 {
            return Err(ScriptError::NoDraw);
        }
        if presents != 1 {
            return Err(ScriptError::PresentCount(presents));
        }
        if !committed {
            return Err(ScriptError::MissingCommit);
        }
        Ok(())
    }
}

use anyhow::{anyhow, ensure, Context, Result};

use crate::device::Gpu;
use crate::mesh::Mesh;
use crate::pipeline::PipelineState;
use crate::view::ViewConfig;
use crate::Abort;

use super::script::{FrameScript, RenderCommand};

/// What a submitted frame contained.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub draws: u32,
    pub indices: u64,
}

/// Replays frame scripts onto the current drawable.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    frames_submitted: u64,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `script` into a fresh command buffer, then commits it and presents.
    ///
    /// `pre_present` runs right before submission (window present notification).
    pub fn submit(
        &mut self,
        gpu: &mut Gpu<'_>,
        view: &ViewConfig,
        mesh: &Mesh,
        pipeline: &PipelineState,
        script: &FrameScript,
        pre_present: impl FnOnce(),
    ) -> Result<FrameStats> {
        script.validate().context(Abort::FrameScript)?;

        let mut frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                let action = gpu.handle_surface_error(&err);
                return Err(anyhow!("surface error: {err} ({action:?})").context(Abort::Drawable));
            }
        };

        let mut stats = FrameStats::default();
        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("firstlight frame pass"),
                color_attachments: &[Some(view.color_attachment(&frame.view))],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for cmd in script.pass_commands() {
                match *cmd {
                    RenderCommand::SetPipeline => rpass.set_pipeline(pipeline.raw()),

                    RenderCommand::SetVertexBuffer { slot, buffer } => {
                        let vb = mesh.vertex_buffers().get(buffer).with_context(|| {
                            format!("mesh '{}' has no vertex buffer {buffer}", mesh.name())
                        })?;
                        rpass.set_vertex_buffer(slot, vb.slice());
                    }

                    RenderCommand::DrawIndexed {
                        submesh,
                        index_count,
                        index_format,
                    } => {
                        let sub = mesh.submeshes().get(submesh).context(Abort::NoSubmesh)?;
                        ensure!(
                            sub.index_format == index_format && index_count <= sub.index_count,
                            "draw of submesh {submesh} does not match its index buffer"
                        );
                        ensure!(
                            index_count as usize % sub.geometry.indices_per_primitive() == 0,
                            "draw of submesh {submesh} ends mid-primitive ({index_count} indices)"
                        );
                        ensure!(
                            sub.geometry == pipeline.geometry(),
                            "submesh {submesh} is {:?} but the pipeline draws {:?}",
                            sub.geometry,
                            pipeline.geometry()
                        );

                        rpass.set_index_buffer(sub.index_buffer.slice(), sub.index_format);
                        rpass.draw_indexed(0..index_count, 0, 0..1);

                        stats.draws += 1;
                        stats.indices += u64::from(index_count);
                    }

                    RenderCommand::BeginPass
                    | RenderCommand::EndPass
                    | RenderCommand::Present
                    | RenderCommand::Commit => {}
                }
            }
        }

        pre_present();
        gpu.submit(frame);
        self.frames_submitted += 1;

        log::info!(
            "frame {} submitted: {} draw(s), {} indices",
            self.frames_submitted,
            stats.draws,
            stats.indices
        );

        Ok(stats)
    }
}


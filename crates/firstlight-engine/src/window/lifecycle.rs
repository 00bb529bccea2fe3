use anyhow::Result;

use crate::core::AppControl;

/// What the event loop should do after a lifecycle transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Step {
    Idle,
    RequestRedraw,
    Exit,
}

/// Bookkeeping for a run that renders exactly one frame.
///
/// `E` is whatever owns the window and its device. The event loop drives the
/// transitions; nothing here touches winit.
pub(crate) struct RunState<E> {
    entry: Option<E>,
    /// Set once after setup; cleared when the frame is handed to the app.
    frame_pending: bool,
    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<E> RunState<E> {
    pub(crate) fn new() -> Self {
        Self {
            entry: None,
            frame_pending: false,
            error: None,
            exit_requested: false,
        }
    }

    /// Builds the entry and runs `setup` against it.
    ///
    /// A failed build never reaches `setup`. Either failure drops the entry and
    /// ends the run. Repeated resumes are ignored.
    pub(crate) fn resume(
        &mut self,
        build: impl FnOnce() -> Result<E>,
        setup: impl FnOnce(&E) -> Result<()>,
    ) -> Step {
        if self.entry.is_some() || self.exit_requested {
            return Step::Idle;
        }

        let entry = match build() {
            Ok(entry) => entry,
            Err(err) => return self.fail(err),
        };

        if let Err(err) = setup(&entry) {
            drop(entry);
            return self.fail(err);
        }

        self.entry = Some(entry);
        self.frame_pending = true;
        Step::RequestRedraw
    }

    /// Hands out the entry for the pending frame, at most once per run.
    pub(crate) fn take_frame(&mut self) -> Option<&mut E> {
        if !self.frame_pending {
            log::trace!("redraw ignored: the frame was already submitted");
            return None;
        }
        let entry = self.entry.as_mut()?;
        self.frame_pending = false;
        Some(entry)
    }

    pub(crate) fn finish_frame(&mut self, result: Result<AppControl>) -> Step {
        match result {
            Ok(AppControl::Continue) => Step::Idle,
            Ok(AppControl::Exit) => self.request_exit(),
            Err(err) => self.fail(err),
        }
    }

    pub(crate) fn fail(&mut self, err: anyhow::Error) -> Step {
        log::debug!("runtime stopping on error: {err:#}");
        if self.error.is_none() {
            self.error = Some(err);
        }
        self.entry = None;
        self.request_exit()
    }

    pub(crate) fn request_exit(&mut self) -> Step {
        self.exit_requested = true;
        Step::Exit
    }

    pub(crate) fn close(&mut self) -> Step {
        self.entry = None;
        self.request_exit()
    }

    pub(crate) fn entry(&self) -> Option<&E> {
        self.entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self) -> Option<&mut E> {
        self.entry.as_mut()
    }

    pub(crate) fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// The first error that stopped the run, if any.
    pub(crate) fn into_result(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use anyhow::anyhow;

    use super::*;
    use crate::Abort;

    /// Stands in for the window entry; counts live instances.
    struct Entry(Rc<Cell<usize>>);

    impl Entry {
        fn new(live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Entry(live.clone())
        }
    }

    impl Drop for Entry {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    fn ready(live: &Rc<Cell<usize>>) -> RunState<Entry> {
        let mut run = RunState::new();
        let step = run.resume(|| Ok(Entry::new(live)), |_| Ok(()));
        assert_eq!(step, Step::RequestRedraw);
        run
    }

    #[test]
    fn device_failure_skips_setup_and_keeps_nothing() {
        let mut run: RunState<Entry> = RunState::new();
        let mut setups = 0;

        let step = run.resume(
            || Err(anyhow!("no adapter").context(Abort::GpuUnsupported)),
            |_| {
                setups += 1;
                Ok(())
            },
        );

        assert_eq!(step, Step::Exit);
        assert_eq!(setups, 0);
        assert!(run.entry().is_none());
        assert!(run.take_frame().is_none());
        assert!(run.exit_requested());

        let err = run.into_result().unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::GpuUnsupported));
    }

    #[test]
    fn resume_after_failure_builds_nothing() {
        let mut run: RunState<Entry> = RunState::new();
        run.resume(|| Err(anyhow!("first").context(Abort::Surface)), |_| Ok(()));

        let mut builds = 0;
        let step = run.resume(
            || {
                builds += 1;
                Err(anyhow!("second"))
            },
            |_| Ok(()),
        );

        assert_eq!(step, Step::Idle);
        assert_eq!(builds, 0);
        let err = run.into_result().unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::Surface));
    }

    #[test]
    fn setup_failure_drops_the_entry() {
        let live = Rc::new(Cell::new(0));
        let mut run = RunState::new();

        let step = run.resume(
            || Ok(Entry::new(&live)),
            |_| Err(anyhow!("bad shader").context(Abort::ShaderCompilation)),
        );

        assert_eq!(step, Step::Exit);
        assert_eq!(live.get(), 0);
        assert!(run.take_frame().is_none());
        let err = run.into_result().unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::ShaderCompilation));
    }

    #[test]
    fn only_the_first_redraw_gets_a_frame() {
        let live = Rc::new(Cell::new(0));
        let mut run = ready(&live);

        let mut frames = 0;
        for _ in 0..3 {
            if run.take_frame().is_some() {
                frames += 1;
                assert_eq!(run.finish_frame(Ok(AppControl::Continue)), Step::Idle);
            }
        }

        assert_eq!(frames, 1);
        assert_eq!(live.get(), 1);
        assert!(run.into_result().is_ok());
    }

    #[test]
    fn redraw_before_resume_is_ignored() {
        let mut run: RunState<Entry> = RunState::new();
        assert!(run.take_frame().is_none());
    }

    #[test]
    fn second_resume_keeps_the_pending_frame_single() {
        let live = Rc::new(Cell::new(0));
        let mut run = ready(&live);
        assert!(run.take_frame().is_some());
        run.finish_frame(Ok(AppControl::Continue));

        let step = run.resume(|| Ok(Entry::new(&live)), |_| Ok(()));
        assert_eq!(step, Step::Idle);
        assert_eq!(live.get(), 1);
        assert!(run.take_frame().is_none());
    }

    #[test]
    fn frame_error_is_returned_and_releases_the_entry() {
        let live = Rc::new(Cell::new(0));
        let mut run = ready(&live);
        assert!(run.take_frame().is_some());

        let step = run.finish_frame(Err(anyhow!("lost surface").context(Abort::Drawable)));
        assert_eq!(step, Step::Exit);
        assert_eq!(live.get(), 0);

        // Later errors do not replace the first one.
        run.fail(anyhow!("late").context(Abort::FrameScript));
        let err = run.into_result().unwrap_err();
        assert_eq!(Abort::of(&err), Some(Abort::Drawable));
    }

    #[test]
    fn close_drops_the_entry_and_exits() {
        let live = Rc::new(Cell::new(0));
        let mut run = ready(&live);
        assert_eq!(run.close(), Step::Exit);
        assert_eq!(live.get(), 0);
        assert!(run.exit_requested());
        assert!(run.into_result().is_ok());
    }
}

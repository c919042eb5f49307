// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Scan controller: capture lifecycle + scan loop.
//!
//! Two states, no more: `Idle` and `Active`. `start` success is the only
//! way in, `stop` the only way out, and a failed `start` stays put. The
//! scan loop is cooperative - `step()` checks the state once at the top of
//! each iteration and is never preempted mid-iteration, so no locking is
//! needed around any of the scan state.

use tracing::{debug, info, warn};

use crate::core::clock::FrameClock;
use crate::core::config::ScanConfig;
use crate::core::error::{AcquireError, Result};
use crate::core::session::CaptureSession;
use crate::core::traits::{CaptureSource, CaptureStream, Decoder, PreviewSink, ResultSink};

/// Outcome of one scan-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Iteration completed; schedule the next one.
    Continue,

    /// The controller is idle; the loop terminates permanently.
    Stopped,
}

/// Marks the intent current at the moment a start attempt began.
///
/// Device acquisition is the one suspension point in the system: the grant
/// can arrive after the user has already toggled the camera back off. A
/// ticket taken before acquiring lets [`ScanController::finish_start`]
/// detect that interleaving and discard the late grant instead of silently
/// reactivating scanning.
#[derive(Debug, Clone, Copy)]
pub struct StartTicket {
    epoch: u64,
}

enum ControllerState<S: CaptureStream> {
    Idle,
    Active(CaptureSession<S>),
}

/// Owns the capture session, the scan loop state, and the duplicate
/// suppression. All collaborators are injected; the controller itself
/// never touches a pixel or a device API.
pub struct ScanController<C, P, D, R>
where
    C: CaptureSource,
    P: PreviewSink,
    D: Decoder,
    R: ResultSink,
{
    source: C,
    preview: P,
    decoder: D,
    sink: R,
    config: ScanConfig,
    state: ControllerState<C::Stream>,
    /// Most recently published payload. Deliberately retained across a
    /// stop/start cycle (matches the source behavior; see DESIGN.md).
    last_payload: Option<String>,
    /// Bumped by every `stop()`, invalidating outstanding start tickets.
    epoch: u64,
}

impl<C, P, D, R> ScanController<C, P, D, R>
where
    C: CaptureSource,
    P: PreviewSink,
    D: Decoder,
    R: ResultSink,
{
    pub fn new(source: C, preview: P, decoder: D, sink: R, config: ScanConfig) -> Self {
        Self {
            source,
            preview,
            decoder,
            sink,
            config,
            state: ControllerState::Idle,
            last_payload: None,
            epoch: 0,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Whether a capture session is active and the loop should keep running.
    pub fn is_scanning(&self) -> bool {
        matches!(self.state, ControllerState::Active(_))
    }

    pub fn last_payload(&self) -> Option<&str> {
        self.last_payload.as_deref()
    }

    /// Acquire a device and enter the scanning state.
    ///
    /// On success the preview sink is bound, the state flips to active, and
    /// exactly one scan-loop step runs to begin the cycle. On acquisition
    /// failure the controller stays idle and the error is returned once -
    /// there is no automatic retry. Calling `start` while already active is
    /// a logged no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.is_scanning() {
            debug!("start ignored: capture session already active");
            return Ok(());
        }

        let ticket = self.start_ticket();
        let outcome = self.source.acquire(self.config.facing);
        self.finish_start(ticket, outcome)
    }

    /// Capture the current intent before a deferred acquisition.
    pub fn start_ticket(&self) -> StartTicket {
        StartTicket { epoch: self.epoch }
    }

    /// Commit (or discard) the outcome of an acquisition that began at
    /// `ticket`. A stale ticket - `stop()` ran in between - releases the
    /// granted stream and leaves the controller idle.
    pub fn finish_start(
        &mut self,
        ticket: StartTicket,
        outcome: std::result::Result<C::Stream, AcquireError>,
    ) -> Result<()> {
        let mut stream = match outcome {
            Ok(stream) => stream,
            Err(err) => {
                warn!(%err, "camera acquisition failed");
                return Err(err.into());
            }
        };

        if ticket.epoch != self.epoch || self.is_scanning() {
            debug!("discarding stale capture grant");
            stream.release();
            return Ok(());
        }

        let (width, height) = stream.dimensions();
        if let Err(err) = self.preview.bind((width, height)) {
            warn!(%err, "preview bind failed");
            stream.release();
            return Err(err);
        }

        info!(width, height, "capture started");
        self.state = ControllerState::Active(CaptureSession::new(stream));

        // Kick off the cycle with a single iteration; the driver loop
        // schedules every subsequent one.
        self.step();
        Ok(())
    }

    /// Release the active session, if any. Idempotent, never fails.
    ///
    /// Also cancels any start attempt still waiting on its grant.
    pub fn stop(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);

        if let ControllerState::Active(session) =
            std::mem::replace(&mut self.state, ControllerState::Idle)
        {
            session.close();
            self.preview.unbind();
            info!("capture stopped");
        }
    }

    /// Alternate between `start` and `stop` on session presence - the
    /// single external control.
    pub fn toggle(&mut self) -> Result<()> {
        if self.is_scanning() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    /// One scan-loop iteration: capture, decode, dedupe, publish.
    ///
    /// A decode miss or a payload equal to the last published one is a
    /// silent no-op. A frame capture error is logged and treated as a miss;
    /// the loop has no failure path of its own.
    pub fn step(&mut self) -> Step {
        let ControllerState::Active(session) = &mut self.state else {
            return Step::Stopped;
        };

        let frame = match session.stream_mut().render_frame() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%err, "frame capture failed, skipping iteration");
                return Step::Continue;
            }
        };

        if let Some(payload) = self.decoder.decode(&frame) {
            if self.last_payload.as_deref() != Some(payload.as_str()) {
                info!(payload = %payload, frame = frame.frame_number, "decoded new payload");
                self.sink.publish(&payload);
                self.last_payload = Some(payload);
            }
        }

        Step::Continue
    }

    /// Drive the loop until it stops, pacing each iteration with `clock`.
    ///
    /// `stop_requested` is polled once per iteration before the state
    /// check; when it reports true the session is stopped and the loop
    /// terminates on its own `Stopped` outcome - cancellation stays
    /// cooperative.
    pub fn run<F>(&mut self, clock: &mut dyn FrameClock, mut stop_requested: F)
    where
        F: FnMut() -> bool,
    {
        debug!(
            rate_hz = clock.rate_hz(),
            clock = clock.description(),
            "scan loop running"
        );

        loop {
            if stop_requested() {
                self.stop();
            }
            if self.step() == Step::Stopped {
                break;
            }
            clock.wait_next_frame();
        }
    }

    /// Explicit end of life: release the session and consume the
    /// controller.
    pub fn dispose(mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{CaptureError, ScanError};
    use crate::core::frame::Frame;
    use crate::core::traits::Facing;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    struct FakeStream {
        released: Rc<Cell<bool>>,
        frames: u64,
        fail_reads: bool,
    }

    impl FakeStream {
        fn new(released: Rc<Cell<bool>>) -> Self {
            Self {
                released,
                frames: 0,
                fail_reads: false,
            }
        }
    }

    impl CaptureStream for FakeStream {
        fn dimensions(&self) -> (u32, u32) {
            (4, 4)
        }

        fn render_frame(&mut self) -> std::result::Result<Frame, CaptureError> {
            if self.fail_reads {
                return Err(CaptureError::FrameRead("fake read failure".into()));
            }
            self.frames += 1;
            Frame::from_luma(4, 4, vec![128; 16], self.frames)
        }

        fn release(&mut self) {
            self.released.set(true);
        }
    }

    #[derive(Default)]
    struct FakeSource {
        grants: VecDeque<std::result::Result<FakeStream, AcquireError>>,
        acquires: usize,
    }

    impl FakeSource {
        fn granting(released: &Rc<Cell<bool>>) -> Self {
            let mut source = Self::default();
            source
                .grants
                .push_back(Ok(FakeStream::new(released.clone())));
            source
        }

        fn denying() -> Self {
            let mut source = Self::default();
            source
                .grants
                .push_back(Err(AcquireError::AccessDenied("fake denial".into())));
            source
        }
    }

    impl CaptureSource for FakeSource {
        type Stream = FakeStream;

        fn acquire(
            &mut self,
            _facing: Facing,
        ) -> std::result::Result<FakeStream, AcquireError> {
            self.acquires += 1;
            self.grants.pop_front().unwrap_or(Err(AcquireError::NoDevice))
        }
    }

    #[derive(Default)]
    struct RecordingPreview {
        binds: usize,
        unbinds: usize,
    }

    impl PreviewSink for RecordingPreview {
        fn bind(&mut self, _dimensions: (u32, u32)) -> Result<()> {
            self.binds += 1;
            Ok(())
        }

        fn unbind(&mut self) {
            self.unbinds += 1;
        }
    }

    struct FailingPreview;

    impl PreviewSink for FailingPreview {
        fn bind(&mut self, _dimensions: (u32, u32)) -> Result<()> {
            Err(ScanError::Preview("fake bind failure".into()))
        }

        fn unbind(&mut self) {}
    }

    /// Replays a scripted sequence of decode outcomes; `None` past the end.
    struct ScriptDecoder {
        script: RefCell<VecDeque<Option<&'static str>>>,
        calls: Rc<Cell<usize>>,
    }

    impl ScriptDecoder {
        fn new(outcomes: &[Option<&'static str>]) -> Self {
            Self {
                script: RefCell::new(outcomes.iter().copied().collect()),
                calls: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Decoder for ScriptDecoder {
        fn decode(&self, _frame: &Frame) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.script
                .borrow_mut()
                .pop_front()
                .flatten()
                .map(str::to_owned)
        }
    }

    #[derive(Clone, Default)]
    struct VecSink {
        published: Rc<RefCell<Vec<String>>>,
    }

    impl ResultSink for VecSink {
        fn publish(&mut self, payload: &str) {
            self.published.borrow_mut().push(payload.to_owned());
        }
    }

    type TestController = ScanController<FakeSource, RecordingPreview, ScriptDecoder, VecSink>;

    fn controller(source: FakeSource, decoder: ScriptDecoder, sink: VecSink) -> TestController {
        ScanController::new(
            source,
            RecordingPreview::default(),
            decoder,
            sink,
            ScanConfig::default(),
        )
    }

    #[test]
    fn dedupe_publishes_each_distinct_consecutive_payload_once() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let decoder = ScriptDecoder::new(&[None, Some("ABC"), Some("ABC"), None, Some("XYZ")]);
        let mut ctl = controller(FakeSource::granting(&released), decoder, sink.clone());

        ctl.start().unwrap(); // first iteration: miss
        for _ in 0..4 {
            assert_eq!(ctl.step(), Step::Continue);
        }

        assert_eq!(*sink.published.borrow(), vec!["ABC", "XYZ"]);
    }

    #[test]
    fn miss_then_same_payload_stays_suppressed() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let decoder = ScriptDecoder::new(&[Some("P"), None, Some("P")]);
        let mut ctl = controller(FakeSource::granting(&released), decoder, sink.clone());

        ctl.start().unwrap();
        ctl.step();
        ctl.step();

        assert_eq!(*sink.published.borrow(), vec!["P"]);
    }

    #[test]
    fn stop_when_idle_is_a_noop() {
        let sink = VecSink::default();
        let mut ctl = controller(FakeSource::default(), ScriptDecoder::new(&[]), sink);

        ctl.stop();
        ctl.stop();
        assert!(!ctl.is_scanning());
        assert_eq!(ctl.step(), Step::Stopped);
    }

    #[test]
    fn failed_start_stays_idle_and_never_runs_the_loop() {
        let sink = VecSink::default();
        let decoder = ScriptDecoder::new(&[Some("SHOULD-NOT-DECODE")]);
        let decode_calls = decoder.calls.clone();
        let mut ctl = controller(FakeSource::denying(), decoder, sink.clone());

        let err = ctl.start().unwrap_err();
        assert!(matches!(err, ScanError::Acquisition(_)));
        assert!(!ctl.is_scanning());
        assert_eq!(ctl.step(), Step::Stopped);
        assert_eq!(decode_calls.get(), 0);
        assert!(sink.published.borrow().is_empty());
    }

    #[test]
    fn failed_preview_bind_releases_stream_and_stays_idle() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let mut ctl = ScanController::new(
            FakeSource::granting(&released),
            FailingPreview,
            ScriptDecoder::new(&[Some("SHOULD-NOT-DECODE")]),
            sink.clone(),
            ScanConfig::default(),
        );

        let err = ctl.start().unwrap_err();
        assert!(matches!(err, ScanError::Preview(_)));
        assert!(!ctl.is_scanning());
        assert!(released.get(), "granted stream must be released on bind failure");
        assert!(sink.published.borrow().is_empty());
    }

    #[test]
    fn stop_releases_stream_and_unbinds_preview() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let mut ctl = controller(
            FakeSource::granting(&released),
            ScriptDecoder::new(&[]),
            sink,
        );

        ctl.start().unwrap();
        assert!(ctl.is_scanning());
        assert_eq!(ctl.preview.binds, 1);

        ctl.stop();
        assert!(!ctl.is_scanning());
        assert!(released.get());
        assert_eq!(ctl.preview.unbinds, 1);
        assert_eq!(ctl.step(), Step::Stopped);
    }

    #[test]
    fn start_while_active_keeps_the_existing_session() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let mut ctl = controller(
            FakeSource::granting(&released),
            ScriptDecoder::new(&[]),
            sink,
        );

        ctl.start().unwrap();
        ctl.start().unwrap();
        assert_eq!(ctl.source.acquires, 1);
        assert!(ctl.is_scanning());
    }

    #[test]
    fn stale_grant_after_stop_is_discarded_and_released() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let mut ctl = controller(FakeSource::default(), ScriptDecoder::new(&[]), sink);

        // start() suspends on acquisition... the user toggles off... and
        // only then does the grant arrive.
        let ticket = ctl.start_ticket();
        ctl.stop();
        let late_grant = Ok(FakeStream::new(released.clone()));

        ctl.finish_start(ticket, late_grant).unwrap();
        assert!(!ctl.is_scanning());
        assert!(released.get(), "late-granted stream must be released");
        assert_eq!(ctl.preview.binds, 0);
    }

    #[test]
    fn last_payload_is_retained_across_stop_start() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let decoder = ScriptDecoder::new(&[Some("KEEP"), Some("KEEP")]);
        let mut source = FakeSource::granting(&released);
        source
            .grants
            .push_back(Ok(FakeStream::new(Rc::new(Cell::new(false)))));
        let mut ctl = controller(source, decoder, sink.clone());

        ctl.start().unwrap(); // publishes "KEEP"
        ctl.stop();
        ctl.start().unwrap(); // decodes "KEEP" again: still suppressed

        assert_eq!(*sink.published.borrow(), vec!["KEEP"]);
        assert_eq!(ctl.last_payload(), Some("KEEP"));
    }

    #[test]
    fn toggle_alternates_on_session_presence() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let mut ctl = controller(
            FakeSource::granting(&released),
            ScriptDecoder::new(&[]),
            sink,
        );

        ctl.toggle().unwrap();
        assert!(ctl.is_scanning());
        ctl.toggle().unwrap();
        assert!(!ctl.is_scanning());
        assert!(released.get());
    }

    #[test]
    fn capture_errors_are_treated_as_missed_frames() {
        let released = Rc::new(Cell::new(false));
        let sink = VecSink::default();
        let decoder = ScriptDecoder::new(&[None, Some("AFTER")]);
        let mut ctl = controller(FakeSource::granting(&released), decoder, sink.clone());

        ctl.start().unwrap();
        if let ControllerState::Active(session) = &mut ctl.state {
            session.stream_mut().fail_reads = true;
        }
        assert_eq!(ctl.step(), Step::Continue);
        assert!(sink.published.borrow().is_empty());

        if let ControllerState::Active(session) = &mut ctl.state {
            session.stream_mut().fail_reads = false;
        }
        ctl.step();
        assert_eq!(*sink.published.borrow(), vec!["AFTER"]);
    }
}

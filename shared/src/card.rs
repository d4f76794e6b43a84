use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::future::{AbortHandle, Abortable};
use futures_signals::map_ref;
use futures_signals::signal::{Mutable, Signal};
use futures_signals::signal_vec::MutableVec;

use crate::constants::{ERROR_INVALID_EMAIL, MAX_ATTACHMENTS, SUCCESS_MESSAGE};
use crate::thumbnail::ThumbnailGenerator;
use crate::types::{Section, SubmitState, Thumbnail};
use crate::utils::{is_valid_email, truncate_message};

pub type SubmitCallback = Rc<dyn Fn(&str)>;

/// What the embedding application passes to the card.
#[derive(Clone)]
pub struct SuggestionProps {
    pub login: bool,
    pub handle_submit: SubmitCallback,
}

impl SuggestionProps {
    pub fn new(handle_submit: impl Fn(&str) + 'static) -> Self {
        Self {
            login: true,
            handle_submit: Rc::new(handle_submit),
        }
    }

    pub fn guest(mut self) -> Self {
        self.login = false;
        self
    }
}

impl std::fmt::Debug for SuggestionProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionProps").field("login", &self.login).finish_non_exhaustive()
    }
}

/// Result of a finished attachment pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// The cap was reached while the file was being processed.
    Full,
    Failed,
    /// The card was unmounted before the thumbnail was ready.
    Dropped,
}

/// State of one mounted suggestion card.
pub struct SuggestionState {
    pub login: bool,
    pub message: Mutable<String>,
    pub email: Mutable<String>,
    pub email_error: Mutable<String>,
    pub section: Mutable<Section>,
    pub attached_files: MutableVec<Thumbnail>,
    pub attach_disabled: Mutable<bool>,
    handle_submit: SubmitCallback,
    pending: RefCell<Vec<(u64, AbortHandle)>>,
    next_pending: Cell<u64>,
}

impl SuggestionState {
    pub fn new(props: SuggestionProps) -> Rc<Self> {
        Rc::new(Self {
            login: props.login,
            message: Mutable::new(String::new()),
            email: Mutable::new(String::new()),
            email_error: Mutable::new(String::new()),
            section: Mutable::new(Section::None),
            attached_files: MutableVec::new(),
            attach_disabled: Mutable::new(false),
            handle_submit: props.handle_submit,
            pending: RefCell::new(vec![]),
            next_pending: Cell::new(0),
        })
    }

    pub fn set_message(&self, text: &str) {
        self.message.set_neq(truncate_message(text).to_string());
    }

    pub fn set_section(&self, section: Section) {
        self.section.set_neq(section);
    }

    /// Validation runs in both modes; the error only blocks submission for
    /// guests.
    pub fn set_email(&self, value: &str) {
        self.email.set_neq(value.to_string());
        if is_valid_email(value) {
            self.email_error.set_neq(String::new());
        } else {
            self.email_error.set_neq(ERROR_INVALID_EMAIL.to_string());
        }
    }

    pub fn submit_state(&self) -> SubmitState {
        compute_submit_state(self.login, &self.message.lock_ref(), &self.email.lock_ref())
    }

    pub fn submit_state_signal(&self) -> impl Signal<Item = SubmitState> {
        let login = self.login;
        map_ref! {
            let message = self.message.signal_cloned(),
            let email = self.email.signal_cloned() =>
            compute_submit_state(login, message, email)
        }
    }

    /// Runs when the submit control is activated. The control is disabled for
    /// an empty message, so only the email is re-checked here.
    pub fn handle_submission(&self) -> bool {
        if !self.login && !is_valid_email(&self.email.lock_ref()) {
            self.email_error.set_neq(ERROR_INVALID_EMAIL.to_string());
            log::debug!("suggestion rejected: invalid email");
            return false;
        }
        (self.handle_submit)(SUCCESS_MESSAGE);
        true
    }

    pub fn can_attach(&self) -> bool {
        self.attached_files.lock_ref().len() < MAX_ATTACHMENTS
    }

    /// Starts the read → render pipeline for one picked file.
    ///
    /// Returns `None` when the card is already full. The returned future must
    /// be driven by the caller's executor; it holds no strong reference to the
    /// card and is aborted by [`SuggestionState::unmount`].
    pub fn attach_file<G>(self: &Rc<Self>, generator: G, source: G::Source) -> Option<impl Future<Output = AttachOutcome>>
    where
        G: ThumbnailGenerator + 'static,
        G::Source: 'static,
    {
        if !self.can_attach() {
            log::debug!("attachment ignored: {MAX_ATTACHMENTS} files already attached");
            return None;
        }

        let id = self.next_pending.get();
        self.next_pending.set(id + 1);
        let (handle, registration) = AbortHandle::new_pair();
        self.pending.borrow_mut().push((id, handle));

        let weak = Rc::downgrade(self);
        let pipeline = run_pipeline(weak.clone(), generator, source);
        let guard = PendingGuard { state: weak, id };

        Some(async move {
            let _guard = guard;
            Abortable::new(pipeline, registration)
                .await
                .unwrap_or(AttachOutcome::Dropped)
        })
    }

    fn push_thumbnail(&self, thumbnail: Thumbnail) -> AttachOutcome {
        let mut files = self.attached_files.lock_mut();
        if files.len() >= MAX_ATTACHMENTS {
            return AttachOutcome::Full;
        }
        files.push_cloned(thumbnail);
        if files.len() == MAX_ATTACHMENTS {
            self.attach_disabled.set_neq(true);
        }
        AttachOutcome::Attached
    }

    /// Out-of-range indexes are ignored. The attach control is re-enabled on
    /// every removal.
    pub fn remove_file(&self, index: usize) {
        {
            let mut files = self.attached_files.lock_mut();
            if index < files.len() {
                files.remove(index);
            }
        }
        self.attach_disabled.set_neq(false);
    }

    pub fn pending_attachments(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Cancels every attachment still in flight.
    pub fn unmount(&self) {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        if !pending.is_empty() {
            log::debug!("unmount: aborting {} pending attachment(s)", pending.len());
        }
        for (_, handle) in pending {
            handle.abort();
        }
    }
}

impl Drop for SuggestionState {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Unregisters an attachment once its future finishes or is dropped unpolled.
struct PendingGuard {
    state: Weak<SuggestionState>,
    id: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.pending.borrow_mut().retain(|(ind, _)| *ind != self.id);
        }
    }
}

async fn run_pipeline<G>(state: Weak<SuggestionState>, generator: G, source: G::Source) -> AttachOutcome
where
    G: ThumbnailGenerator,
{
    let image = match generator.read(source).await {
        Ok(image) => image,
        Err(err) => {
            log::warn!("attachment read failed: {err}");
            return AttachOutcome::Failed;
        }
    };
    if state.strong_count() == 0 {
        return AttachOutcome::Dropped;
    }

    let thumbnail = match generator.render(image).await {
        Ok(thumbnail) => thumbnail,
        Err(err) => {
            log::warn!("attachment render failed: {err}");
            return AttachOutcome::Failed;
        }
    };

    match state.upgrade() {
        Some(state) => state.push_thumbnail(thumbnail),
        None => AttachOutcome::Dropped,
    }
}

fn compute_submit_state(login: bool, message: &str, email: &str) -> SubmitState {
    if !message.trim().is_empty() && (login || is_valid_email(email)) {
        SubmitState::Enabled
    } else {
        SubmitState::Disabled
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::{block_on, LocalPool};
    use futures::future::{self, FutureExt, LocalBoxFuture};
    use futures::task::LocalSpawnExt;
    use futures_signals::signal::SignalExt;

    use crate::data_url::DataUrl;
    use crate::error::ThumbnailError;

    use super::*;

    /// Generator that skips decoding and tags each thumbnail with its source.
    #[derive(Clone, Copy)]
    struct FakeThumbnailer;

    impl ThumbnailGenerator for FakeThumbnailer {
        type Source = &'static str;

        fn read(&self, source: &'static str) -> LocalBoxFuture<'static, Result<DataUrl, ThumbnailError>> {
            if source.is_empty() {
                return future::ready(Err(ThumbnailError::Read("empty".to_string()))).boxed_local();
            }
            future::ready(Ok(DataUrl::from_bytes("image/png", source.as_bytes()))).boxed_local()
        }

        fn render(&self, image: DataUrl) -> LocalBoxFuture<'static, Result<Thumbnail, ThumbnailError>> {
            let result = image.decode().map(|bytes| Thumbnail(DataUrl::from_bytes("image/jpeg", &bytes)));
            future::ready(result).boxed_local()
        }
    }

    /// Generator whose read never resolves.
    struct StalledThumbnailer;

    impl ThumbnailGenerator for StalledThumbnailer {
        type Source = ();

        fn read(&self, _: ()) -> LocalBoxFuture<'static, Result<DataUrl, ThumbnailError>> {
            future::pending().boxed_local()
        }

        fn render(&self, _: DataUrl) -> LocalBoxFuture<'static, Result<Thumbnail, ThumbnailError>> {
            future::pending().boxed_local()
        }
    }

    fn card(login: bool) -> (Rc<SuggestionState>, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(vec![]));
        let sink = calls.clone();
        let mut props = SuggestionProps::new(move |text| sink.borrow_mut().push(text.to_string()));
        props.login = login;
        (SuggestionState::new(props), calls)
    }

    fn attach(state: &Rc<SuggestionState>, name: &'static str) -> Option<AttachOutcome> {
        state.attach_file(FakeThumbnailer, name).map(block_on)
    }

    #[test]
    fn props_default_to_login_mode() {
        let props = SuggestionProps::new(|_| {});
        assert!(props.login);
        assert!(!props.guest().login);
    }

    #[test]
    fn email_error_tracks_every_edit() {
        let (state, _) = card(true);
        state.set_email("a@b");
        assert_eq!(state.email_error.get_cloned(), ERROR_INVALID_EMAIL);
        state.set_email("a@b.co");
        assert_eq!(state.email_error.get_cloned(), "");
        assert_eq!(state.email.get_cloned(), "a@b.co");
    }

    #[test]
    fn whitespace_message_keeps_submit_disabled() {
        for login in [true, false] {
            let (state, _) = card(login);
            state.set_email("a@b.co");
            assert_eq!(state.submit_state(), SubmitState::Disabled);
            state.set_message("   \n\t");
            assert_eq!(state.submit_state(), SubmitState::Disabled);
        }
    }

    #[test]
    fn login_mode_ignores_bad_email() {
        let (state, calls) = card(true);
        state.set_message("Add dark mode");
        state.set_email("bad-email");
        assert_eq!(state.submit_state(), SubmitState::Enabled);
        assert!(state.handle_submission());
        assert_eq!(*calls.borrow(), vec![SUCCESS_MESSAGE.to_string()]);
    }

    #[test]
    fn guest_submission_with_untouched_email_sets_error() {
        let (state, calls) = card(false);
        state.set_message("idea");
        assert_eq!(state.email_error.get_cloned(), "");
        assert!(!state.handle_submission());
        assert_eq!(state.email_error.get_cloned(), ERROR_INVALID_EMAIL);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn submission_keeps_form_contents() {
        let (state, _) = card(true);
        state.set_message("keep me");
        attach(&state, "one");
        assert!(state.handle_submission());
        assert_eq!(state.message.get_cloned(), "keep me");
        assert_eq!(state.attached_files.lock_ref().len(), 1);
    }

    #[test]
    fn section_is_not_part_of_payload() {
        let (state, calls) = card(true);
        state.set_message("x");
        state.set_section(Section::Quizzes);
        state.handle_submission();
        assert_eq!(state.section.get(), Section::Quizzes);
        assert_eq!(*calls.borrow(), vec![SUCCESS_MESSAGE.to_string()]);
    }

    #[test]
    fn message_is_capped() {
        let (state, _) = card(true);
        state.set_message(&"a".repeat(1200));
        assert_eq!(state.message.get_cloned().len(), 1000);
    }

    #[test]
    fn submit_signal_follows_inputs() {
        let (state, _) = card(false);
        let seen = Rc::new(RefCell::new(vec![]));
        let mut pool = LocalPool::new();
        let sink = seen.clone();
        pool.spawner()
            .spawn_local(state.submit_state_signal().for_each(move |value| {
                sink.borrow_mut().push(value);
                async {}
            }))
            .unwrap();

        pool.run_until_stalled();
        state.set_message("x");
        pool.run_until_stalled();
        state.set_email("a@b.co");
        pool.run_until_stalled();
        state.set_message(" ");
        pool.run_until_stalled();

        assert_eq!(
            *seen.borrow(),
            vec![SubmitState::Disabled, SubmitState::Disabled, SubmitState::Enabled, SubmitState::Disabled]
        );
    }

    #[test]
    fn second_attachment_disables_attach() {
        let (state, _) = card(true);
        assert_eq!(attach(&state, "one"), Some(AttachOutcome::Attached));
        assert!(!state.attach_disabled.get());
        assert_eq!(attach(&state, "two"), Some(AttachOutcome::Attached));
        assert!(state.attach_disabled.get());
        assert_eq!(attach(&state, "three"), None);
        assert_eq!(state.attached_files.lock_ref().len(), 2);
        assert_eq!(state.pending_attachments(), 0);
    }

    #[test]
    fn attachments_keep_pick_order() {
        let (state, _) = card(true);
        attach(&state, "one");
        attach(&state, "two");
        let files = state.attached_files.lock_ref();
        assert_eq!(files[0].0.decode().unwrap(), b"one");
        assert_eq!(files[1].0.decode().unwrap(), b"two");
    }

    #[test]
    fn removing_either_file_reenables_attach() {
        for index in [0, 1] {
            let (state, _) = card(true);
            attach(&state, "one");
            attach(&state, "two");
            state.remove_file(index);
            assert!(!state.attach_disabled.get());
            assert_eq!(state.attached_files.lock_ref().len(), 1);
            assert!(state.can_attach());
        }
    }

    #[test]
    fn removal_out_of_range_only_clears_flag() {
        let (state, _) = card(true);
        attach(&state, "one");
        state.remove_file(5);
        assert_eq!(state.attached_files.lock_ref().len(), 1);
        assert!(!state.attach_disabled.get());
    }

    #[test]
    fn failed_read_adds_nothing() {
        let (state, _) = card(true);
        assert_eq!(attach(&state, ""), Some(AttachOutcome::Failed));
        assert!(state.attached_files.lock_ref().is_empty());
        assert!(!state.attach_disabled.get());
    }

    #[test]
    fn overlapping_attachments_respect_cap() {
        let (state, _) = card(true);
        attach(&state, "one");
        let second = state.attach_file(FakeThumbnailer, "two").unwrap();
        let third = state.attach_file(FakeThumbnailer, "three").unwrap();
        assert_eq!(block_on(second), AttachOutcome::Attached);
        assert_eq!(block_on(third), AttachOutcome::Full);
        assert_eq!(state.attached_files.lock_ref().len(), 2);
    }

    #[test]
    fn removal_during_read_does_not_cancel_it() {
        let (state, _) = card(true);
        attach(&state, "one");
        let pending = state.attach_file(FakeThumbnailer, "two").unwrap();
        state.remove_file(0);
        assert_eq!(block_on(pending), AttachOutcome::Attached);
        assert_eq!(state.attached_files.lock_ref().len(), 1);
        assert!(!state.attach_disabled.get());
    }

    #[test]
    fn unmount_aborts_in_flight_attachment() {
        let (state, _) = card(true);
        let pending = state.attach_file(StalledThumbnailer, ()).unwrap();
        assert_eq!(state.pending_attachments(), 1);
        state.unmount();
        assert_eq!(block_on(pending), AttachOutcome::Dropped);
        assert!(state.attached_files.lock_ref().is_empty());
    }

    #[test]
    fn dropping_unpolled_attachment_unregisters_it() {
        let (state, _) = card(true);
        let pending = state.attach_file(StalledThumbnailer, ()).unwrap();
        assert_eq!(state.pending_attachments(), 1);
        drop(pending);
        assert_eq!(state.pending_attachments(), 0);
    }

    #[test]
    fn dropping_attachment_mid_flight_unregisters_it() {
        let (state, _) = card(true);
        let mut pending = Box::pin(state.attach_file(StalledThumbnailer, ()).unwrap());
        assert_eq!((&mut pending).now_or_never(), None);
        drop(pending);
        assert_eq!(state.pending_attachments(), 0);
        assert!(state.can_attach());
    }

    #[test]
    fn dropped_card_discards_result() {
        let (state, _) = card(true);
        let pending = state.attach_file(FakeThumbnailer, "late").unwrap();
        drop(state);
        assert_eq!(block_on(pending), AttachOutcome::Dropped);
    }
}

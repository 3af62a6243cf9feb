/// Menu-action dispatcher: selection text -> AI capability -> appended note

use crate::ai::Capabilities;
use crate::error::{DispatchError, DispatchResult};
use crate::note::{Note, NoteKind};
use crate::storage::NoteStore;
use futures::lock::Mutex;

type Clock = Box<dyn Fn() -> Option<String>>;

pub struct Dispatcher<S: NoteStore> {
    store: S,
    capabilities: Capabilities,
    clock: Clock,
    // Serializes read-append-write so rapid clicks don't drop notes
    append_lock: Mutex<()>,
}

impl<S: NoteStore> Dispatcher<S> {
    pub fn new(store: S, capabilities: Capabilities) -> Self {
        Dispatcher {
            store,
            capabilities,
            clock: Box::new(|| None),
            append_lock: Mutex::new(()),
        }
    }

    /// Source of the timestamp stamped on each new note
    pub fn with_clock(mut self, clock: impl Fn() -> Option<String> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Handle one menu click. On any error the stored list is untouched.
    pub async fn dispatch(
        &self,
        action_id: &str,
        selection: Option<&str>,
    ) -> DispatchResult<Note> {
        let text = selection
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(DispatchError::NoSelection)?;

        let kind = NoteKind::from_id(action_id)
            .ok_or_else(|| DispatchError::UnknownAction(action_id.to_string()))?;

        log::info!(
            "Running {} on {} chars of selected text",
            kind,
            text.chars().count()
        );

        let content = self.capabilities.run(kind, text).await.map_err(|e| {
            log::warn!("{} failed: {}", kind, e);
            DispatchError::from(e)
        })?;

        let note = Note::new(kind, content, (self.clock)());

        let _guard = self.append_lock.lock().await;
        let data = self.store.append(note.clone()).await.map_err(|e| {
            log::error!("Failed to save {} note: {}", kind, e);
            DispatchError::StorageFailure(e)
        })?;

        log::info!("Saved {} result to notebook ({} notes)", kind, data.len());
        Ok(note)
    }
}

/// Notification text for a finished menu action
pub fn outcome_message(result: &DispatchResult<Note>) -> String {
    match result {
        Ok(note) => format!("{} completed!", note.kind.display_name()),
        Err(e) => format!("⚠️ {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::fake::FakeAi;
    use crate::error::{AiError, StoreError};
    use crate::storage::memory::MemoryNoteStore;
    use crate::storage::NotebookData;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    fn capabilities() -> Capabilities {
        Capabilities::new()
            .with(Box::new(FakeAi::returning(
                NoteKind::Summarize,
                "Plants convert light into chemical energy.",
            )))
            .with(Box::new(FakeAi::returning(NoteKind::Simplify, "Simple version.")))
            .with(Box::new(FakeAi::returning(NoteKind::Quiz, "Q1: What is ATP?")))
    }

    #[test]
    fn test_summarize_into_empty_notebook() {
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), capabilities());

        let note = block_on(
            dispatcher.dispatch("summarize", Some("Photosynthesis converts light to energy")),
        )
        .unwrap();

        assert_eq!(note.kind, NoteKind::Summarize);
        assert_eq!(
            dispatcher.store.snapshot().notes(),
            vec![Note::new(
                NoteKind::Summarize,
                "Plants convert light into chemical energy.".to_string(),
                None
            )]
        );
    }

    #[test]
    fn test_simplify_appends_after_existing_quiz() {
        let quiz = Note::new(
            NoteKind::Quiz,
            "Q1?".to_string(),
            Some("2024-10-28T10:30:00.000Z".to_string()),
        );
        let store = MemoryNoteStore::with_notes(vec![quiz.clone()]);
        let dispatcher = Dispatcher::new(store, capabilities());

        block_on(dispatcher.dispatch("simplify", Some("Some dense paragraph."))).unwrap();

        let notes = dispatcher.store.snapshot().notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0], quiz);
        assert_eq!(notes[1].kind, NoteKind::Simplify);
        assert_eq!(notes[1].content, "Simple version.");
    }

    #[test]
    fn test_quiz_output_saved_verbatim() {
        let output = "Q1: What?\n  a) x\n  b) y\n";
        let caps = Capabilities::new().with(Box::new(FakeAi::returning(NoteKind::Quiz, output)));
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), caps);

        let note = block_on(dispatcher.dispatch("quiz", Some("text"))).unwrap();

        assert_eq!(note.content, output);
        assert_eq!(dispatcher.store.snapshot().notes()[0].content, output);
    }

    #[test]
    fn test_failed_ai_call_leaves_list_unchanged() {
        let existing = Note::new(NoteKind::Quiz, "Q1?".to_string(), None);
        let store = MemoryNoteStore::with_notes(vec![existing.clone()]);
        let caps = Capabilities::new()
            .with(Box::new(FakeAi::failing(NoteKind::Summarize, "model crashed")));
        let dispatcher = Dispatcher::new(store, caps);

        let result = block_on(dispatcher.dispatch("summarize", Some("text")));

        assert!(matches!(
            result,
            Err(DispatchError::AiCapabilityUnavailable(AiError::Failed { .. }))
        ));
        assert_eq!(dispatcher.store.snapshot().notes(), vec![existing]);
        assert_eq!(dispatcher.store.writes.get(), 0);
    }

    #[test]
    fn test_unavailable_capability() {
        let caps = Capabilities::new().with(Box::new(FakeAi::unavailable(NoteKind::Quiz)));
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), caps);

        let result = block_on(dispatcher.dispatch("quiz", Some("text")));

        assert_eq!(
            result,
            Err(DispatchError::AiCapabilityUnavailable(AiError::Unavailable(NoteKind::Quiz)))
        );
        assert!(dispatcher.store.snapshot().is_empty());
    }

    #[test]
    fn test_empty_result_is_not_saved() {
        let caps =
            Capabilities::new().with(Box::new(FakeAi::returning(NoteKind::Summarize, "  ")));
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), caps);

        let result = block_on(dispatcher.dispatch("summarize", Some("text")));

        assert_eq!(result, Err(DispatchError::EmptyResult(NoteKind::Summarize)));
        assert!(dispatcher.store.snapshot().is_empty());
    }

    #[test]
    fn test_missing_or_blank_selection() {
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), capabilities());

        assert_eq!(
            block_on(dispatcher.dispatch("summarize", None)),
            Err(DispatchError::NoSelection)
        );
        assert_eq!(
            block_on(dispatcher.dispatch("summarize", Some(" \n\t "))),
            Err(DispatchError::NoSelection)
        );
        assert!(dispatcher.store.snapshot().is_empty());
    }

    #[test]
    fn test_unknown_action() {
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), capabilities());

        let result = block_on(dispatcher.dispatch("translate", Some("hola")));

        assert_eq!(result, Err(DispatchError::UnknownAction("translate".to_string())));
    }

    #[test]
    fn test_selection_is_trimmed_before_ai_call() {
        let summarizer = FakeAi::returning(NoteKind::Summarize, "ok");
        let calls = summarizer.calls.clone();
        let dispatcher = Dispatcher::new(
            MemoryNoteStore::default(),
            Capabilities::new().with(Box::new(summarizer)),
        );

        block_on(dispatcher.dispatch("summarize", Some("  padded text \n"))).unwrap();

        assert_eq!(*calls.borrow(), vec!["padded text".to_string()]);
        assert_eq!(dispatcher.store.snapshot().notes()[0].content, "ok");
    }

    #[test]
    fn test_storage_failure_reported() {
        let store = MemoryNoteStore::default();
        store.fail_writes(true);
        let dispatcher = Dispatcher::new(store, capabilities());

        let result = block_on(dispatcher.dispatch("quiz", Some("text")));

        assert!(matches!(
            result,
            Err(DispatchError::StorageFailure(StoreError::Write(_)))
        ));
        assert!(dispatcher.store.snapshot().is_empty());
    }

    #[test]
    fn test_storage_read_failure_reported() {
        let store = MemoryNoteStore::default();
        store.fail_reads(true);
        let dispatcher = Dispatcher::new(store, capabilities());

        let result = block_on(dispatcher.dispatch("summarize", Some("text")));

        assert!(matches!(
            result,
            Err(DispatchError::StorageFailure(StoreError::Read(_)))
        ));
    }

    #[test]
    fn test_clock_stamps_note() {
        let dispatcher = Dispatcher::new(MemoryNoteStore::default(), capabilities())
            .with_clock(|| Some("2024-10-28T10:30:00.000Z".to_string()));

        let note = block_on(dispatcher.dispatch("quiz", Some("text"))).unwrap();

        assert_eq!(note.timestamp.as_deref(), Some("2024-10-28T10:30:00.000Z"));
        assert_eq!(dispatcher.store.snapshot().notes()[0], note);
    }

    #[test]
    fn test_list_never_shrinks() {
        let store = MemoryNoteStore::default();
        let caps = capabilities()
            .with(Box::new(FakeAi::failing(NoteKind::Simplify, "busy")));
        let dispatcher = Dispatcher::new(store, caps);

        let actions = [
            ("summarize", Some("a")),
            ("simplify", Some("b")),
            ("quiz", Some("c")),
            ("quiz", None),
            ("summarize", Some("d")),
            ("bogus", Some("e")),
        ];

        let mut last_len = 0;
        for (action, selection) in actions {
            let _ = block_on(dispatcher.dispatch(action, selection));
            let len = dispatcher.store.snapshot().len();
            assert!(len >= last_len);
            last_len = len;
        }
        assert_eq!(last_len, 3);
    }

    // Yields once so a second task can run between read and write
    struct YieldNow(bool);

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    #[derive(Default)]
    struct SlowStore {
        data: RefCell<NotebookData>,
    }

    #[async_trait(?Send)]
    impl NoteStore for SlowStore {
        async fn get(&self) -> Result<NotebookData, StoreError> {
            Ok(self.data.borrow().clone())
        }

        async fn append(&self, note: Note) -> Result<NotebookData, StoreError> {
            let mut data = self.get().await?;
            YieldNow(false).await;
            data.append(note);
            *self.data.borrow_mut() = data.clone();
            Ok(data)
        }
    }

    #[test]
    fn test_rapid_clicks_do_not_lose_notes() {
        let dispatcher = Dispatcher::new(SlowStore::default(), capabilities());

        let (a, b) = block_on(async {
            futures::join!(
                dispatcher.dispatch("summarize", Some("first")),
                dispatcher.dispatch("quiz", Some("second")),
            )
        });

        assert!(a.is_ok());
        assert!(b.is_ok());
        let notes = dispatcher.store.data.borrow().notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].kind, NoteKind::Summarize);
        assert_eq!(notes[1].kind, NoteKind::Quiz);
    }

    #[test]
    fn test_outcome_message() {
        let ok = Ok(Note::new(NoteKind::Quiz, "Q".to_string(), None));
        assert_eq!(outcome_message(&ok), "Quiz completed!");

        let err = Err(DispatchError::NoSelection);
        assert_eq!(outcome_message(&err), "⚠️ No text selected");
    }
}

//! App-level state machine around the proof screen.
//!
//! `update()` handles screen messages and async completions, returning
//! an `AppAction` for the shell to turn into effects. The app is
//! constructed with explicit context — the active account and the
//! result of the composition-time capability probe — rather than
//! reading ambient state.

use std::path::PathBuf;

use poex_protocol::{AccountId, Claim, ClaimStatus, Digest, TxCall};
use poex_ui::screens::proof::{self, ProofScreen};

use crate::files::LoadedFile;

/// Top-level application message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// Messages from the proof screen.
    Proof(proof::Message),
    /// File picker finished (None = cancelled).
    FilePicked(Option<PathBuf>),
    /// File read and digest computation finished (None = read failed).
    FileLoaded(Option<LoadedFile>),
    /// A claim entry emission from the subscription keyed by `digest`.
    ClaimEntry {
        digest: Digest,
        entry: Option<Claim>,
    },
    /// A transaction status line (from the submission status stream).
    TxStatus(String),
}

/// Result of processing an app message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    None,
    /// Open the native file picker.
    OpenFilePicker,
    /// Read the file and compute its digest.
    HashFile(PathBuf),
    /// Retarget the claim watcher at this digest.
    WatchDigest(Digest),
    /// Submit a signed transaction.
    Submit(TxCall),
}

/// Top-level application state.
pub struct App {
    /// Proof screen state.
    pub proof_screen: ProofScreen,
    /// Whether the node exposes the proofs query. Probed once at
    /// composition time; when false the app renders nothing.
    pub proofs_available: bool,
}

impl App {
    pub fn new(account: Option<AccountId>, proofs_available: bool) -> Self {
        Self {
            proof_screen: ProofScreen::new(account),
            proofs_available,
        }
    }

    /// The account transactions are signed with.
    pub fn account(&self) -> Option<&AccountId> {
        self.proof_screen.account.as_ref()
    }

    /// Handle a top-level message and return an action.
    pub fn update(&mut self, message: AppMessage) -> AppAction {
        match message {
            AppMessage::Proof(msg) => {
                if !self.proofs_available {
                    return AppAction::None;
                }
                match self.proof_screen.update(msg) {
                    proof::Action::None => AppAction::None,
                    proof::Action::OpenFilePicker => AppAction::OpenFilePicker,
                    proof::Action::Submit(call) => AppAction::Submit(call),
                }
            }
            AppMessage::FilePicked(Some(path)) => AppAction::HashFile(path),
            AppMessage::FilePicked(None) => AppAction::None,
            AppMessage::FileLoaded(Some(loaded)) => {
                if self
                    .proof_screen
                    .file_digested(loaded.file_name, loaded.digest)
                {
                    AppAction::WatchDigest(loaded.digest)
                } else {
                    AppAction::None
                }
            }
            // Failed read: the digest never updates.
            AppMessage::FileLoaded(None) => AppAction::None,
            AppMessage::ClaimEntry { digest, entry } => {
                // The watcher tears down the old subscription before the
                // new one is created, but an emission for the previous
                // digest can still be queued behind this update; only
                // the current digest's emissions may mutate the status.
                if self.proof_screen.digest == Some(digest) {
                    self.proof_screen
                        .claim_changed(ClaimStatus::from_entry(entry));
                } else {
                    tracing::trace!(digest = %digest, "dropping stale claim emission");
                }
                AppAction::None
            }
            AppMessage::TxStatus(status) => {
                self.proof_screen.set_tx_status(status);
                AppAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poex_chain::testing::recv_entry;
    use poex_chain::{ChainClient, ClaimWatcher, Node};
    use proof::Message;

    fn alice() -> AccountId {
        AccountId::from("alice")
    }

    fn app() -> App {
        App::new(Some(alice()), true)
    }

    fn loaded(name: &str, byte: u8) -> LoadedFile {
        LoadedFile {
            file_name: name.to_string(),
            digest: Digest([byte; 32]),
        }
    }

    #[test]
    fn choose_file_requests_picker() {
        let mut app = app();
        let action = app.update(AppMessage::Proof(Message::ChooseFile));
        assert_eq!(action, AppAction::OpenFilePicker);
    }

    #[test]
    fn cancelled_picker_is_a_no_op() {
        let mut app = app();
        assert_eq!(app.update(AppMessage::FilePicked(None)), AppAction::None);
    }

    #[test]
    fn picked_file_is_hashed() {
        let mut app = app();
        let path = PathBuf::from("/tmp/file.bin");
        assert_eq!(
            app.update(AppMessage::FilePicked(Some(path.clone()))),
            AppAction::HashFile(path)
        );
    }

    #[test]
    fn new_digest_retargets_the_watcher() {
        let mut app = app();
        let action = app.update(AppMessage::FileLoaded(Some(loaded("a.txt", 1))));
        assert_eq!(action, AppAction::WatchDigest(Digest([1; 32])));
    }

    #[test]
    fn same_digest_does_not_retarget() {
        let mut app = app();
        app.update(AppMessage::FileLoaded(Some(loaded("a.txt", 1))));
        let action = app.update(AppMessage::FileLoaded(Some(loaded("copy.txt", 1))));
        assert_eq!(action, AppAction::None);
    }

    #[test]
    fn failed_read_leaves_digest_untouched() {
        let mut app = app();
        app.update(AppMessage::FileLoaded(Some(loaded("a.txt", 1))));
        assert_eq!(app.update(AppMessage::FileLoaded(None)), AppAction::None);
        assert_eq!(app.proof_screen.digest, Some(Digest([1; 32])));
    }

    #[test]
    fn stale_emission_does_not_mutate_status() {
        let mut app = app();
        app.update(AppMessage::FileLoaded(Some(loaded("a.txt", 2))));

        // Emission keyed by a digest that is no longer current.
        app.update(AppMessage::ClaimEntry {
            digest: Digest([1; 32]),
            entry: Some(Claim {
                owner: alice(),
                block: 9,
            }),
        });
        assert_eq!(app.proof_screen.claim, ClaimStatus::Unclaimed);
    }

    #[test]
    fn current_emission_updates_status() {
        let mut app = app();
        app.update(AppMessage::FileLoaded(Some(loaded("a.txt", 3))));

        app.update(AppMessage::ClaimEntry {
            digest: Digest([3; 32]),
            entry: Some(Claim {
                owner: alice(),
                block: 5,
            }),
        });
        assert!(app.proof_screen.is_claimed());
        assert!(app.proof_screen.can_revoke());
    }

    #[test]
    fn tx_status_is_displayed_verbatim() {
        let mut app = app();
        app.update(AppMessage::TxStatus("Transaction failed: boom".to_string()));
        assert_eq!(app.proof_screen.tx_status, "Transaction failed: boom");
    }

    #[test]
    fn missing_capability_ignores_screen_messages() {
        let mut app = App::new(Some(alice()), false);
        assert_eq!(
            app.update(AppMessage::Proof(Message::ChooseFile)),
            AppAction::None
        );
    }

    // --- End-to-end claim flow against a live in-process node ---

    /// Bridge one watcher emission into the app, tagged with the
    /// digest it was keyed by (what the shell's stream task does).
    async fn pump_entry(
        app: &mut App,
        digest: Digest,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<Option<Claim>>,
    ) {
        let entry = recv_entry(rx).await;
        app.update(AppMessage::ClaimEntry { digest, entry });
    }

    #[tokio::test]
    async fn claim_and_revoke_round_trip() {
        let node = Node::new();
        let client = ChainClient::new(node.clone());
        let mut watcher = ClaimWatcher::new(client.clone());
        let mut app = App::new(Some(alice()), client.supports_proof_queries());

        // File chosen and digested.
        let digest = Digest([7; 32]);
        let action = app.update(AppMessage::FileLoaded(Some(LoadedFile {
            file_name: "thesis.pdf".to_string(),
            digest,
        })));
        assert_eq!(action, AppAction::WatchDigest(digest));

        let mut rx = watcher.retarget(Some(digest)).unwrap();
        pump_entry(&mut app, digest, &mut rx).await;
        assert!(!app.proof_screen.is_claimed());

        // Create the claim.
        let action = app.update(AppMessage::Proof(Message::CreateClaim));
        let AppAction::Submit(call) = action else {
            panic!("expected a submission, got {action:?}");
        };
        let mut status_rx = client.submit_signed(call, &alice());
        while let Some(status) = status_rx.recv().await {
            app.update(AppMessage::TxStatus(status.to_string()));
        }
        assert_eq!(app.proof_screen.tx_status, "Included at block 1");

        pump_entry(&mut app, digest, &mut rx).await;
        assert!(app.proof_screen.is_claimed());
        assert!(app.proof_screen.can_revoke());

        // Revoke it again.
        let action = app.update(AppMessage::Proof(Message::RevokeClaim));
        let AppAction::Submit(call) = action else {
            panic!("expected a submission, got {action:?}");
        };
        let mut status_rx = client.submit_signed(call, &alice());
        while let Some(status) = status_rx.recv().await {
            app.update(AppMessage::TxStatus(status.to_string()));
        }

        pump_entry(&mut app, digest, &mut rx).await;
        assert!(!app.proof_screen.is_claimed());
    }

    #[tokio::test]
    async fn foreign_claim_blocks_both_actions() {
        let node = Node::new();
        let client = ChainClient::new(node.clone());
        let mut watcher = ClaimWatcher::new(client.clone());
        let mut app = App::new(Some(alice()), true);

        let digest = Digest([8; 32]);
        node.apply(&TxCall::create_claim(&digest), &AccountId::from("bob"))
            .unwrap();

        app.update(AppMessage::FileLoaded(Some(LoadedFile {
            file_name: "doc.txt".to_string(),
            digest,
        })));
        let mut rx = watcher.retarget(Some(digest)).unwrap();
        pump_entry(&mut app, digest, &mut rx).await;

        assert!(app.proof_screen.is_claimed());
        assert!(!app.proof_screen.can_revoke());
        assert_eq!(
            app.update(AppMessage::Proof(Message::CreateClaim)),
            AppAction::None
        );
        assert_eq!(
            app.update(AppMessage::Proof(Message::RevokeClaim)),
            AppAction::None
        );
    }

    #[tokio::test]
    async fn digest_change_tears_down_and_resubscribes_once() {
        let node = Node::new();
        let client = ChainClient::new(node.clone());
        let mut watcher = ClaimWatcher::new(client);
        let mut app = App::new(Some(alice()), true);

        let d1 = Digest([9; 32]);
        assert_eq!(
            app.update(AppMessage::FileLoaded(Some(LoadedFile {
                file_name: "one.txt".to_string(),
                digest: d1,
            }))),
            AppAction::WatchDigest(d1)
        );
        let _rx1 = watcher.retarget(Some(d1)).unwrap();
        assert_eq!(node.watcher_count(&d1), 1);

        let d2 = Digest([10; 32]);
        assert_eq!(
            app.update(AppMessage::FileLoaded(Some(LoadedFile {
                file_name: "two.txt".to_string(),
                digest: d2,
            }))),
            AppAction::WatchDigest(d2)
        );
        let _rx2 = watcher.retarget(Some(d2)).unwrap();

        assert_eq!(node.watcher_count(&d1), 0);
        assert_eq!(node.watcher_count(&d2), 1);
    }
}

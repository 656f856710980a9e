mod app;
mod files;
mod settings;

use app::{AppAction, AppMessage};
use poex_chain::{ChainClient, ClaimWatcher, Node};
use settings::Settings;
use tokio::sync::mpsc;

use iced::{Element, Task};
use tracing_subscriber::EnvFilter;

/// Top-level Iced application wrapper.
///
/// Bridges the `App` state machine to the Iced runtime by converting
/// `AppAction` returns into `iced::Task` effects.
struct PoexApp {
    app: app::App,
    client: ChainClient,
    watcher: ClaimWatcher,
}

impl Default for PoexApp {
    fn default() -> Self {
        let settings = Settings::load();
        let client = ChainClient::new(Node::new());
        // One-time feature probe: without the proofs query the claim
        // watcher has nothing to subscribe to and the app renders
        // nothing at all.
        let proofs_available = client.supports_proof_queries();
        if !proofs_available {
            tracing::warn!("node does not expose the proofs query");
        }
        Self {
            app: app::App::new(settings.account(), proofs_available),
            watcher: ClaimWatcher::new(client.clone()),
            client,
        }
    }
}

impl PoexApp {
    fn update(&mut self, message: AppMessage) -> Task<AppMessage> {
        let action = self.app.update(message);
        match action {
            AppAction::None => Task::none(),
            AppAction::OpenFilePicker => {
                Task::perform(files::pick_file(), AppMessage::FilePicked)
            }
            AppAction::HashFile(path) => {
                Task::perform(files::load_and_digest(path), AppMessage::FileLoaded)
            }
            AppAction::WatchDigest(digest) => match self.watcher.retarget(Some(digest)) {
                Some(rx) => Task::run(receiver_stream(rx), move |entry| AppMessage::ClaimEntry {
                    digest,
                    entry,
                }),
                // Subscription failure: claim state simply stops updating.
                None => Task::none(),
            },
            AppAction::Submit(call) => {
                let Some(signer) = self.app.account().cloned() else {
                    return Task::none();
                };
                let rx = self.client.submit_signed(call, &signer);
                Task::run(receiver_stream(rx), |status| {
                    AppMessage::TxStatus(status.to_string())
                })
            }
        }
    }

    fn view(&self) -> Element<'_, AppMessage> {
        if !self.app.proofs_available {
            return iced::widget::column![].into();
        }
        self.app.proof_screen.view().map(AppMessage::Proof)
    }
}

/// Adapt an unbounded receiver into a stream for `Task::run`.
fn receiver_stream<T: Send + 'static>(
    rx: mpsc::UnboundedReceiver<T>,
) -> impl iced::futures::Stream<Item = T> {
    iced::futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|item| (item, rx))
    })
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("poex starting");

    let theme = match Settings::load().theme {
        settings::Theme::Light => iced::Theme::Light,
        settings::Theme::Dark => iced::Theme::Dark,
    };

    iced::application(PoexApp::default, PoexApp::update, PoexApp::view)
        .title("poex")
        .theme(theme)
        .run()
}

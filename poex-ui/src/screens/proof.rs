//! Proof-of-existence screen: pick a file, watch its claim, and
//! create or revoke a claim on its digest.

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Renderer, Theme};

use poex_protocol::{AccountId, ClaimStatus, Digest, TxCall};

/// Messages emitted by the proof screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// User clicked "Choose File".
    ChooseFile,
    /// User clicked "Create Claim".
    CreateClaim,
    /// User clicked "Revoke Claim".
    RevokeClaim,
}

/// Result of processing a proof screen message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No external action needed.
    None,
    /// Open the native file picker.
    OpenFilePicker,
    /// Submit a signed transaction.
    Submit(TxCall),
}

/// State of the proof screen.
#[derive(Debug, Clone)]
pub struct ProofScreen {
    /// The active account, if any. Without one the screen renders
    /// nothing at all.
    pub account: Option<AccountId>,
    /// Name of the chosen file.
    pub file_name: Option<String>,
    /// Digest of the chosen file's content.
    pub digest: Option<Digest>,
    /// Live claim status for the current digest.
    pub claim: ClaimStatus,
    /// Last transaction status line, displayed verbatim.
    pub tx_status: String,
}

impl ProofScreen {
    pub fn new(account: Option<AccountId>) -> Self {
        Self {
            account,
            file_name: None,
            digest: None,
            claim: ClaimStatus::Unclaimed,
            tx_status: String::new(),
        }
    }

    /// True iff the current digest is claimed by someone.
    pub fn is_claimed(&self) -> bool {
        self.claim.is_claimed()
    }

    /// True iff the current digest is claimed by the active account.
    pub fn can_revoke(&self) -> bool {
        match &self.account {
            Some(account) => self.claim.can_revoke(account),
            None => false,
        }
    }

    /// Record a freshly computed digest for a chosen file.
    ///
    /// Returns `true` when the digest actually changed; the claim
    /// status is then reset to unclaimed and the caller must
    /// resubscribe. Re-picking a file with identical content reports
    /// `false` and leaves the claim status alone.
    pub fn file_digested(&mut self, file_name: String, digest: Digest) -> bool {
        let changed = self.digest != Some(digest);
        self.file_name = Some(file_name);
        if changed {
            tracing::debug!(digest = %digest, "file digest changed");
            self.digest = Some(digest);
            self.claim = ClaimStatus::Unclaimed;
        }
        changed
    }

    /// Replace the claim status wholesale with a subscription emission.
    pub fn claim_changed(&mut self, claim: ClaimStatus) {
        self.claim = claim;
    }

    /// Replace the transaction status line.
    pub fn set_tx_status(&mut self, status: String) {
        self.tx_status = status;
    }

    /// Handle a message and return any external action to perform.
    ///
    /// The claim gate is enforced here as well as in the view's
    /// disabled buttons: a create on a claimed digest or a revoke
    /// without ownership is a no-op.
    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::ChooseFile => Action::OpenFilePicker,
            Message::CreateClaim => match self.digest {
                Some(digest) if self.account.is_some() && !self.is_claimed() => {
                    Action::Submit(TxCall::create_claim(&digest))
                }
                _ => Action::None,
            },
            Message::RevokeClaim => match self.digest {
                Some(digest) if self.can_revoke() => {
                    Action::Submit(TxCall::revoke_claim(&digest))
                }
                _ => Action::None,
            },
        }
    }

    /// Render the proof screen.
    ///
    /// Renders an empty element when there is no active account.
    pub fn view(&self) -> Element<'_, Message, Theme, Renderer> {
        if self.account.is_none() {
            return column![].into();
        }

        let title = text("Proof of Existence").size(28);

        let choose_btn = button(text("Choose File")).on_press(Message::ChooseFile);
        let file_label = text(self.file_name.as_deref().unwrap_or("")).size(12);
        let picker_row = row![choose_btn, file_label]
            .spacing(10)
            .align_y(Alignment::Center);

        let status_section: Element<'_, Message, Theme, Renderer> = match (&self.digest, &self.claim)
        {
            (None, _) => text("No file chosen.").size(14).into(),
            (Some(digest), ClaimStatus::Unclaimed) => {
                let header = text("File Digest Unclaimed")
                    .size(14)
                    .color(iced::Color::from_rgb(0.3, 0.8, 0.3));
                let digest_line = text(digest.to_hex()).size(12);
                column![header, digest_line].spacing(3).into()
            }
            (Some(digest), ClaimStatus::Claimed(claim)) => {
                let header = text("File Digest Claimed")
                    .size(14)
                    .color(iced::Color::from_rgb(0.9, 0.6, 0.2));
                let digest_line = text(digest.to_hex()).size(12);
                let owner_line = text(format!("Owner: {}", claim.owner)).size(12);
                let block_line = text(format!("Block: {}", claim.block)).size(12);
                column![header, digest_line, owner_line, block_line]
                    .spacing(3)
                    .into()
            }
        };

        let create_btn = button(text("Create Claim")).on_press_maybe(
            (self.digest.is_some() && !self.is_claimed()).then_some(Message::CreateClaim),
        );
        let revoke_btn = button(text("Revoke Claim"))
            .on_press_maybe(self.can_revoke().then_some(Message::RevokeClaim));
        let actions = row![create_btn, revoke_btn].spacing(10);

        let status_line = text(self.tx_status.as_str()).size(12);

        let content = column![title, picker_row, status_section, actions, status_line]
            .spacing(15)
            .padding(40);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

use futures::future::BoxFuture;
use futures::FutureExt;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use super::data::PermissionState;

/// How many times the user can be asked before further requests are refused
/// without showing a dialog.
const MAX_PROMPTS_PER_SESSION: u8 = 2;

/// The host's permission subsystem.
///
/// `request` is fire-and-forget from the UI's point of view: the returned
/// future resolves once the user has answered, and the gate re-reads the
/// host state only then.
pub trait PermissionHost: Send + Sync + 'static {
    /// Is media-read access currently granted?
    fn is_granted(&self) -> bool;

    /// Ask the user for media-read access. Resolves to the updated grant.
    fn request(&self) -> BoxFuture<'static, bool>;
}

/// Tracks the media-read permission for one gallery screen
#[derive(Debug, Default)]
pub struct PermissionGate {
    state: PermissionState,
    requesting: bool,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    pub fn is_granted(&self) -> bool {
        self.state == PermissionState::Granted
    }

    /// A request has been issued and the host has not answered yet
    pub fn is_requesting(&self) -> bool {
        self.requesting
    }

    /// Mirror what the host currently reports.
    ///
    /// Returns true when this call moved the gate into `Granted`.
    pub fn refresh(&mut self, host_granted: bool) -> bool {
        let was_granted = self.is_granted();
        self.state = if host_granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        };
        !was_granted && self.is_granted()
    }

    /// Mark a request as in flight.
    ///
    /// Returns false when there is nothing to ask for (already granted) or a
    /// request is already pending; the caller must not call the host then.
    pub fn begin_request(&mut self) -> bool {
        if self.is_granted() || self.requesting {
            return false;
        }
        self.requesting = true;
        true
    }

    /// The host signalled that the request finished.
    ///
    /// Returns true when the gate became `Granted`.
    pub fn complete_request(&mut self, host_granted: bool) -> bool {
        self.requesting = false;
        self.refresh(host_granted)
    }
}

/// Desktop permission host: asks for consent with a native dialog.
///
/// The grant lives for the process only. After the user declines
/// `MAX_PROMPTS_PER_SESSION` times, requests resolve to `false` immediately.
#[derive(Debug, Clone, Default)]
pub struct DialogPermissionHost {
    granted: Arc<AtomicBool>,
    denials: Arc<AtomicU8>,
}

impl DialogPermissionHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PermissionHost for DialogPermissionHost {
    fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request(&self) -> BoxFuture<'static, bool> {
        let granted = Arc::clone(&self.granted);
        let denials = Arc::clone(&self.denials);

        async move {
            if granted.load(Ordering::SeqCst) {
                return true;
            }
            if denials.load(Ordering::SeqCst) >= MAX_PROMPTS_PER_SESSION {
                tracing::info!("media access was refused for this session, not asking again");
                return false;
            }

            let answer = AsyncMessageDialog::new()
                .set_level(MessageLevel::Info)
                .set_title("Allow access to your photos?")
                .set_description(
                    "Photo Gallery needs to read your Downloads and Pictures folders to show your images.",
                )
                .set_buttons(MessageButtons::YesNo)
                .show()
                .await;

            let allowed = answer == MessageDialogResult::Yes;
            if allowed {
                granted.store(true, Ordering::SeqCst);
            } else {
                denials.fetch_add(1, Ordering::SeqCst);
            }
            tracing::info!(allowed, "media access request answered");
            allowed
        }
        .boxed()
    }
}

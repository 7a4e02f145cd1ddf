// Admission control ("waiting room") protocol
//
// A guest who is not yet a member of a room asks to enter; the room's host
// admits or turns them away. The roster of outstanding requests lives behind
// the host-side controller, the guest side is a small optimistic state
// machine, and both tolerate duplicated, reordered, and lost channel
// messages by treating every operation as a precondition-checked no-op.

// Public API
pub use controller::HostAdmissionController;
pub use guest::{GuestAdmissionClient, GuestAdmissionState, GuestIdentity};
pub use notifier::{HostChannelNotifier, NotificationSink, TracingNotificationSink};
pub use roster::{JoinRequest, PendingRoster};
pub use subscriber::AdmissionRoomSubscriber;
pub use subscriptions::AdmissionSubscriptions;

// Internal modules
mod controller;
mod guest;
mod notifier;
mod roster;
mod subscriber;
mod subscriptions;

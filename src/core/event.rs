//! Events and the patterns rows use to match them.
//!
//! Rows never inspect event payloads to decide whether they apply; they
//! compare the event's kind against their declared pattern. Payloads are
//! for guards and actions.

use std::fmt::Debug;

/// An external stimulus fed to the machine.
///
/// `Kind` is the closed enumeration rows match against. For plain fieldless
/// enums the event can be its own kind, which is what [`event_enum!`]
/// generates.
///
/// # Example
///
/// ```rust
/// use fsm_table::core::Event;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum PacketKind {
///     Data,
///     Ack,
/// }
///
/// #[derive(Debug)]
/// enum Packet {
///     Data(Vec<u8>),
///     Ack(u32),
/// }
///
/// impl Event for Packet {
///     type Kind = PacketKind;
///
///     fn kind(&self) -> PacketKind {
///         match self {
///             Self::Data(_) => PacketKind::Data,
///             Self::Ack(_) => PacketKind::Ack,
///         }
///     }
/// }
///
/// assert_eq!(Packet::Ack(7).kind(), PacketKind::Ack);
/// ```
///
/// [`event_enum!`]: crate::event_enum
pub trait Event: Debug {
    /// Discriminant used for row matching.
    type Kind: Copy + PartialEq + Debug + Send + Sync;

    /// The kind of this event.
    fn kind(&self) -> Self::Kind;
}

/// Event side of a row: a specific kind, or any event at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPattern<K> {
    /// Matches every event.
    Any,
    /// Matches events of exactly this kind.
    Kind(K),
}

impl<K: PartialEq> EventPattern<K> {
    /// Check whether an event of `kind` satisfies this pattern.
    pub fn matches(&self, kind: &K) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(expected) => expected == kind,
        }
    }

    /// Whether every event matched by `other` is also matched by `self`.
    pub fn covers(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, _) => true,
            (Self::Kind(_), Self::Any) => false,
            (Self::Kind(a), Self::Kind(b)) => a == b,
        }
    }
}

impl<K> From<K> for EventPattern<K> {
    fn from(kind: K) -> Self {
        Self::Kind(kind)
    }
}

//! Macros for ergonomic state and event declarations.

/// Generate a `State` implementation for a fieldless enum, plus a
/// `variants()` list for declaring the registry.
///
/// States declared this way use the default no-op `enter`/`exit` hooks.
/// Implement [`State`](crate::core::State) by hand to attach hooks.
///
/// # Example
///
/// ```
/// use fsm_table::state_enum;
/// use fsm_table::core::State;
///
/// state_enum! {
///     pub enum Phase {
///         Idle,
///         Busy,
///     }
/// }
///
/// assert_eq!(Phase::Busy.name(), "Busy");
/// assert_eq!(Phase::variants(), vec![Phase::Idle, Phase::Busy]);
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            $vis fn variants() -> ::std::vec::Vec<Self> {
                ::std::vec![$(Self::$variant),*]
            }
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate an `Event` implementation for a fieldless enum that serves as
/// its own kind.
///
/// # Example
///
/// ```
/// use fsm_table::event_enum;
/// use fsm_table::core::Event;
///
/// event_enum! {
///     pub enum Button {
///         Press,
///         Release,
///     }
/// }
///
/// assert_eq!(Button::Press.kind(), Button::Press);
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            type Kind = Self;

            fn kind(&self) -> Self {
                *self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_enum! {
        enum TestEvent {
            Tick,
            Tock,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
        TestState::Processing.enter();
        TestState::Processing.exit();
    }

    #[test]
    fn state_enum_lists_variants_in_order() {
        assert_eq!(
            TestState::variants(),
            vec![
                TestState::Initial,
                TestState::Processing,
                TestState::Complete
            ]
        );
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_eq!(PublicState::variants().len(), 2);
    }

    #[test]
    fn event_enum_is_its_own_kind() {
        assert_eq!(TestEvent::Tick.kind(), TestEvent::Tick);
        assert_ne!(TestEvent::Tock.kind(), TestEvent::Tick);
    }
}

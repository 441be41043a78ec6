//! Payment session status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// How a resolved session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionKind {
    /// Payment authorised, order placed.
    Authorized,
    /// Payment received or pending, order placed.
    Pending,
    /// Order already existed and was looked up by merchant reference.
    Recovered,
    /// Processor refused or cancelled; no order.
    Rejected,
}

/// Lifecycle of a redirect payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSessionStatus {
    /// Attempt created, nothing sent to the processor yet.
    Initialized,

    /// Shopper was redirected away; cart is locked.
    AwaitingRedirectResult,

    /// Terminal.
    Resolved(ResolutionKind),

    /// Terminal. Challenge token did not bind to this session.
    Aborted,
}

impl PaymentSessionStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, PaymentSessionStatus::Resolved(_))
    }
}

const ALL_RESOLUTIONS: [ResolutionKind; 4] = [
    ResolutionKind::Authorized,
    ResolutionKind::Pending,
    ResolutionKind::Recovered,
    ResolutionKind::Rejected,
];

impl StateMachine for PaymentSessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentSessionStatus::*;
        matches!(
            (self, target),
            // From INITIALIZED
            (Initialized, AwaitingRedirectResult)
            // Direct authorisation resolves without a redirect
                | (Initialized, Resolved(_))
            // From AWAITING_REDIRECT_RESULT
                | (AwaitingRedirectResult, Resolved(_))
                | (AwaitingRedirectResult, Aborted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentSessionStatus::*;
        match self {
            Initialized => std::iter::once(AwaitingRedirectResult)
                .chain(ALL_RESOLUTIONS.iter().map(|kind| Resolved(*kind)))
                .collect(),
            AwaitingRedirectResult => ALL_RESOLUTIONS
                .iter()
                .map(|kind| Resolved(*kind))
                .chain(std::iter::once(Aborted))
                .collect(),
            Resolved(_) | Aborted => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PaymentSessionStatus::*;

    #[test]
    fn initialized_can_await_redirect() {
        assert_eq!(
            Initialized.transition_to(AwaitingRedirectResult),
            Ok(AwaitingRedirectResult)
        );
    }

    #[test]
    fn initialized_can_resolve_directly() {
        for kind in ALL_RESOLUTIONS {
            assert_eq!(Initialized.transition_to(Resolved(kind)), Ok(Resolved(kind)));
        }
    }

    #[test]
    fn initialized_cannot_abort() {
        assert!(!Initialized.can_transition_to(&Aborted));
    }

    #[test]
    fn awaiting_can_reach_every_resolution() {
        for kind in ALL_RESOLUTIONS {
            assert!(AwaitingRedirectResult.can_transition_to(&Resolved(kind)));
        }
        assert!(AwaitingRedirectResult.can_transition_to(&Aborted));
    }

    #[test]
    fn awaiting_cannot_go_back_to_initialized() {
        assert!(AwaitingRedirectResult.transition_to(Initialized).is_err());
    }

    #[test]
    fn resolved_and_aborted_are_terminal() {
        for kind in ALL_RESOLUTIONS {
            assert!(Resolved(kind).is_terminal());
        }
        assert!(Aborted.is_terminal());
        assert!(!Initialized.is_terminal());
        assert!(!AwaitingRedirectResult.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        let all = [
            Initialized,
            AwaitingRedirectResult,
            Resolved(ResolutionKind::Authorized),
            Resolved(ResolutionKind::Pending),
            Resolved(ResolutionKind::Recovered),
            Resolved(ResolutionKind::Rejected),
            Aborted,
        ];
        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }
}

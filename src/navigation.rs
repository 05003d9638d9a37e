//! Client navigation lifecycle: `Idle -> Navigating -> Settled`.
//!
//! A new navigation that starts while another is in flight cancels the older
//! one. That is the only place a navigation is ever cancelled; completions
//! carrying a stale ticket are ignored.

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationPhase {
    Idle,
    Navigating { id: u64, target: String },
    Settled { id: u64, target: String },
}

/// Handle for one started navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTicket(u64);

/// Result of starting a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Started {
    pub ticket: NavigationTicket,

    /// Target of the in-flight navigation this one cancelled
    pub superseded: Option<String>,
}

/// Something that can send the client to a URL.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

#[derive(Debug, Clone)]
pub struct NavigationMachine {
    phase: NavigationPhase,
    next_id: u64,
}

impl NavigationMachine {
    pub fn new() -> Self {
        Self {
            phase: NavigationPhase::Idle,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> &NavigationPhase {
        &self.phase
    }

    pub fn is_navigating(&self) -> bool {
        matches!(self.phase, NavigationPhase::Navigating { .. })
    }

    /// Route-change start event.
    pub fn begin(&mut self, target: &str) -> Started {
        let id = self.next_id;
        self.next_id += 1;

        let previous = std::mem::replace(
            &mut self.phase,
            NavigationPhase::Navigating {
                id,
                target: target.to_string(),
            },
        );

        let superseded = match previous {
            NavigationPhase::Navigating { target: old, .. } => {
                debug!("Navigation to {} superseded by {}", old, target);
                Some(old)
            }
            _ => None,
        };

        Started {
            ticket: NavigationTicket(id),
            superseded,
        }
    }

    /// Route-change complete event. Returns `false` for a stale ticket.
    pub fn complete(&mut self, ticket: NavigationTicket) -> bool {
        match &self.phase {
            NavigationPhase::Navigating { id, target } if *id == ticket.0 => {
                self.phase = NavigationPhase::Settled {
                    id: *id,
                    target: target.clone(),
                };
                true
            }
            _ => false,
        }
    }

    /// Back to `Idle` once the settled state has been consumed.
    pub fn reset(&mut self) {
        self.phase = NavigationPhase::Idle;
    }
}

impl Default for NavigationMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for NavigationMachine {
    fn navigate(&mut self, url: &str) {
        self.begin(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let machine = NavigationMachine::new();
        assert_eq!(machine.phase(), &NavigationPhase::Idle);
        assert!(!machine.is_navigating());
    }

    #[test]
    fn test_begin_then_complete() {
        let mut machine = NavigationMachine::new();
        let started = machine.begin("/en/about");
        assert_eq!(started.superseded, None);
        assert!(machine.is_navigating());

        assert!(machine.complete(started.ticket));
        assert_eq!(
            machine.phase(),
            &NavigationPhase::Settled {
                id: 1,
                target: "/en/about".into()
            }
        );
    }

    #[test]
    fn test_new_navigation_supersedes_in_flight() {
        let mut machine = NavigationMachine::new();
        let first = machine.begin("/a");
        let second = machine.begin("/b");

        assert_eq!(second.superseded.as_deref(), Some("/a"));
        assert!(!machine.complete(first.ticket), "stale ticket must be ignored");
        assert!(machine.is_navigating());
        assert!(machine.complete(second.ticket));
    }

    #[test]
    fn test_begin_after_settled_does_not_report_superseded() {
        let mut machine = NavigationMachine::new();
        let first = machine.begin("/a");
        machine.complete(first.ticket);
        assert_eq!(machine.begin("/b").superseded, None);
    }

    #[test]
    fn test_complete_twice_is_noop() {
        let mut machine = NavigationMachine::new();
        let started = machine.begin("/a");
        assert!(machine.complete(started.ticket));
        assert!(!machine.complete(started.ticket));
    }

    #[test]
    fn test_reset() {
        let mut machine = NavigationMachine::new();
        let started = machine.begin("/a");
        machine.complete(started.ticket);
        machine.reset();
        assert_eq!(machine.phase(), &NavigationPhase::Idle);
    }

    #[test]
    fn test_navigator_impl_begins_navigation() {
        let mut machine = NavigationMachine::new();
        machine.navigate("https://www.example.nl/en");
        assert!(matches!(
            machine.phase(),
            NavigationPhase::Navigating { target, .. } if target == "https://www.example.nl/en"
        ));
    }
}

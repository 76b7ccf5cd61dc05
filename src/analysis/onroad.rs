//! Agents, aliens and hamburgers lying on a path, and the food chain between them
//!
//! Actors are plain values. Resolving a path's food chain returns a new list
//! in which every capture and meal is recorded by index into that list; the
//! input is never touched, so concurrent scoring runs share nothing.

use std::fmt;

/// Which end of its path an actor faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards the lower-numbered border slot
    Left,
    /// Towards the higher-numbered border slot
    Right,
}

/// An agent standing on a road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    /// Facing along the path
    pub heading: Heading,
    /// Index of the captured alien
    pub capturing: Option<usize>,
}

impl Agent {
    /// Free agent facing `heading`
    pub const fn new(heading: Heading) -> Self {
        Self {
            heading,
            capturing: None,
        }
    }

    /// This agent after capturing the alien at `alien`
    #[must_use]
    pub const fn capture(self, alien: usize) -> Self {
        Self {
            capturing: Some(alien),
            ..self
        }
    }

    /// Whether no alien has been captured
    pub const fn is_free(&self) -> bool {
        self.capturing.is_none()
    }
}

/// An alien standing on a road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alien {
    /// Facing along the path
    pub heading: Heading,
    /// Index of the capturing agent
    pub captured_by: Option<usize>,
    /// Index of the last hamburger eaten
    pub eating: Option<usize>,
}

impl Alien {
    /// Free, hungry alien facing `heading`
    pub const fn new(heading: Heading) -> Self {
        Self {
            heading,
            captured_by: None,
            eating: None,
        }
    }

    /// This alien after capture by the agent at `agent`
    #[must_use]
    pub const fn captured(self, agent: usize) -> Self {
        Self {
            captured_by: Some(agent),
            ..self
        }
    }

    /// This alien after eating the hamburger at `hamburger`
    #[must_use]
    pub const fn eat(self, hamburger: usize) -> Self {
        Self {
            eating: Some(hamburger),
            ..self
        }
    }

    /// Whether no agent holds the alien
    pub const fn is_free(&self) -> bool {
        self.captured_by.is_none()
    }

    /// Whether the alien has not eaten
    pub const fn is_hungry(&self) -> bool {
        self.eating.is_none()
    }
}

/// A hamburger on a road; one alien from each side may eat it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamburger {
    /// Indices of the aliens that ate it
    pub eaten_by: [Option<usize>; 2],
}

impl Hamburger {
    /// Uneaten hamburger
    pub const fn new() -> Self {
        Self {
            eaten_by: [None, None],
        }
    }

    /// This hamburger after the alien at `alien` eats it
    #[must_use]
    pub const fn eaten(self, alien: usize) -> Self {
        let eaten_by = match self.eaten_by {
            [None, second] => [Some(alien), second],
            [first, _] => [first, Some(alien)],
        };
        Self { eaten_by }
    }

    /// Whether no alien has eaten it
    pub const fn is_free(&self) -> bool {
        matches!(self.eaten_by, [None, _])
    }
}

/// Anything that can stand on a road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnRoad {
    /// An agent
    Agent(Agent),
    /// An alien
    Alien(Alien),
    /// A hamburger
    Hamburger(Hamburger),
}

impl OnRoad {
    /// Facing of an agent or alien
    pub const fn heading(&self) -> Option<Heading> {
        match self {
            Self::Agent(agent) => Some(agent.heading),
            Self::Alien(alien) => Some(alien.heading),
            Self::Hamburger(_) => None,
        }
    }

    /// Whether this is an agent facing `heading`
    pub fn is_agent_facing(&self, heading: Heading) -> bool {
        matches!(self, Self::Agent(agent) if agent.heading == heading)
    }

    /// Whether this is an alien facing `heading`
    pub fn is_alien_facing(&self, heading: Heading) -> bool {
        matches!(self, Self::Alien(alien) if alien.heading == heading)
    }

    /// Whether this is an alien no agent holds
    pub const fn is_free_alien(&self) -> bool {
        matches!(self, Self::Alien(alien) if alien.is_free())
    }
}

impl fmt::Display for OnRoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = |heading: Heading| match heading {
            Heading::Left => '<',
            Heading::Right => '>',
        };
        match self {
            Self::Agent(agent) => write!(f, "{}Ag", arrow(agent.heading)),
            Self::Alien(alien) => write!(f, "{}Al", arrow(alien.heading)),
            Self::Hamburger(_) => write!(f, "Hb"),
        }
    }
}

fn update(objects: &mut [OnRoad], index: usize, change: impl FnOnce(OnRoad) -> OnRoad) {
    if let Some(object) = objects.get_mut(index) {
        *object = change(*object);
    }
}

/// Resolve captures and meals along a path listed from left to right
///
/// One pass from the left end:
/// - a left-facing agent captures the latest free alien behind it;
/// - a right-facing agent waits, and captures the next alien reached;
/// - an alien not captured on arrival registers as free;
/// - a left-facing alien eats the latest uneaten hamburger behind it, while a
///   right-facing alien eats every hamburger reached after it.
pub fn resolve_food_chain(objects: &[OnRoad]) -> Vec<OnRoad> {
    let mut resolved = objects.to_vec();

    let mut waiting_agent: Option<usize> = None;
    let mut free_alien_left: Option<usize> = None;
    let mut free_alien_right: Option<usize> = None;
    let mut hungry_alien: Option<usize> = None;
    let mut last_hamburger: Option<usize> = None;

    for index in 0..resolved.len() {
        let Some(&current) = resolved.get(index) else {
            continue;
        };

        match current {
            OnRoad::Agent(agent) => match agent.heading {
                Heading::Left => {
                    if let Some(target) = free_alien_left.max(free_alien_right) {
                        update(&mut resolved, index, |object| match object {
                            OnRoad::Agent(agent) => OnRoad::Agent(agent.capture(target)),
                            other => other,
                        });
                        update(&mut resolved, target, |object| match object {
                            OnRoad::Alien(alien) => OnRoad::Alien(alien.captured(index)),
                            other => other,
                        });
                        if free_alien_left == Some(target) {
                            free_alien_left = None;
                        } else {
                            free_alien_right = None;
                        }
                    }
                }
                Heading::Right => waiting_agent = Some(index),
            },

            OnRoad::Alien(mut alien) => {
                if let Some(agent_index) = waiting_agent.take() {
                    update(&mut resolved, agent_index, |object| match object {
                        OnRoad::Agent(agent) => OnRoad::Agent(agent.capture(index)),
                        other => other,
                    });
                    alien = alien.captured(agent_index);
                } else {
                    match alien.heading {
                        Heading::Left => free_alien_left = Some(index),
                        Heading::Right => free_alien_right = Some(index),
                    }
                }

                match alien.heading {
                    Heading::Left => {
                        if let Some(hamburger_index) = last_hamburger.take() {
                            alien = alien.eat(hamburger_index);
                            update(&mut resolved, hamburger_index, |object| match object {
                                OnRoad::Hamburger(hamburger) => {
                                    OnRoad::Hamburger(hamburger.eaten(index))
                                }
                                other => other,
                            });
                        }
                    }
                    Heading::Right => hungry_alien = Some(index),
                }

                update(&mut resolved, index, |_| OnRoad::Alien(alien));
            }

            OnRoad::Hamburger(mut hamburger) => {
                if let Some(alien_index) = hungry_alien {
                    update(&mut resolved, alien_index, |object| match object {
                        OnRoad::Alien(alien) => OnRoad::Alien(alien.eat(index)),
                        other => other,
                    });
                    hamburger = hamburger.eaten(alien_index);
                }
                last_hamburger = Some(index);
                update(&mut resolved, index, |_| OnRoad::Hamburger(hamburger));
            }
        }
    }

    resolved
}

// Draw session: participants, remaining receivers, and the step-by-step engine.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::assignment::Assignment;
use super::cycle::shuffled_cycle;
use crate::error::DrawError;

/// Smallest group that can form a cycle without self-gifting.
pub const MIN_PARTICIPANTS: usize = 2;

// ---------------------------------------------------------------------------
// Phase / strategy
// ---------------------------------------------------------------------------

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No session yet; the front end is collecting names.
    Input,
    /// A session exists and at least one draw is outstanding.
    Drawing,
    /// Every participant has drawn.
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Input => "input",
            Phase::Drawing => "drawing",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a draw picks its receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawStrategy {
    /// Pick uniformly from the filtered candidate set at every step.
    #[default]
    Sequential,
    /// Shuffle a full cycle up front and reveal one receiver per draw.
    Cycle,
}

impl FromStr for DrawStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(DrawStrategy::Sequential),
            "cycle" => Ok(DrawStrategy::Cycle),
            other => Err(format!(
                "unknown draw strategy `{other}` (expected `sequential` or `cycle`)"
            )),
        }
    }
}

impl fmt::Display for DrawStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawStrategy::Sequential => f.write_str("sequential"),
            DrawStrategy::Cycle => f.write_str("cycle"),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One draw, from the first pick to the closing of the cycle.
///
/// A session only changes through [`Session::draw`]. A failed draw leaves it
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// All participants in input order.
    participants: Vec<String>,
    /// The participant about to draw; `None` once finished.
    current_drawer: Option<String>,
    /// Participants nobody has drawn yet, in input order.
    remaining_receivers: Vec<String>,
    /// Committed draws in draw order.
    assignments: Vec<Assignment>,
    phase: Phase,
    strategy: DrawStrategy,
    /// Receivers in reveal order for [`DrawStrategy::Cycle`]; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    planned: Vec<String>,
}

impl Session {
    /// Start a sequential draw.
    ///
    /// Rejects lists shorter than [`MIN_PARTICIPANTS`], duplicate names and a
    /// starting drawer that is not listed.
    pub fn start(participants: Vec<String>, starting_drawer: &str) -> Result<Self, DrawError> {
        check_setup(&participants, starting_drawer)?;
        Ok(Self::build(
            participants,
            starting_drawer,
            DrawStrategy::Sequential,
            Vec::new(),
        ))
    }

    /// Start a draw with an explicit strategy.
    ///
    /// `rng` is only consumed by [`DrawStrategy::Cycle`], which shuffles its
    /// whole reveal order here.
    pub fn start_with<R: Rng + ?Sized>(
        participants: Vec<String>,
        starting_drawer: &str,
        strategy: DrawStrategy,
        rng: &mut R,
    ) -> Result<Self, DrawError> {
        check_setup(&participants, starting_drawer)?;
        let planned = match strategy {
            DrawStrategy::Sequential => Vec::new(),
            DrawStrategy::Cycle => shuffled_cycle(&participants, starting_drawer, rng),
        };
        Ok(Self::build(participants, starting_drawer, strategy, planned))
    }

    fn build(
        participants: Vec<String>,
        starting_drawer: &str,
        strategy: DrawStrategy,
        planned: Vec<String>,
    ) -> Self {
        info!(
            "Draw started: {} participants, first drawer '{}', strategy {}",
            participants.len(),
            starting_drawer,
            strategy
        );
        Session {
            remaining_receivers: participants.clone(),
            participants,
            current_drawer: Some(starting_drawer.to_string()),
            assignments: Vec::new(),
            phase: Phase::Drawing,
            strategy,
            planned,
        }
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn current_drawer(&self) -> Option<&str> {
        self.current_drawer.as_deref()
    }

    pub fn remaining_receivers(&self) -> &[String] {
        &self.remaining_receivers
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn strategy(&self) -> DrawStrategy {
        self.strategy
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The giver of the very first draw, once it has happened.
    pub fn first_giver(&self) -> Option<&str> {
        self.assignments.first().map(|a| a.giver.as_str())
    }

    /// Legal receivers for the pending draw, in input order.
    ///
    /// The drawer is never a candidate. The first giver is held back while any
    /// other receiver remains, so the chain can only close back onto it with
    /// the final draw. Empty once the session is finished.
    pub fn candidates(&self) -> Vec<&str> {
        let Some(drawer) = self.current_drawer.as_deref() else {
            return Vec::new();
        };

        let open: Vec<&str> = self
            .remaining_receivers
            .iter()
            .map(String::as_str)
            .filter(|name| *name != drawer)
            .collect();

        let Some(first) = self.first_giver() else {
            return open;
        };

        let held_back: Vec<&str> = open.iter().copied().filter(|name| *name != first).collect();
        if held_back.is_empty() {
            open
        } else {
            held_back
        }
    }

    /// Commit one draw: the current drawer picks a receiver, who draws next.
    ///
    /// Fails without touching the session when the game is not in the
    /// drawing phase or no legal receiver exists.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Assignment, DrawError> {
        if self.phase != Phase::Drawing {
            error!("Draw requested in phase {}", self.phase);
            return Err(DrawError::NotDrawing { phase: self.phase });
        }
        let Some(drawer) = self.current_drawer.clone() else {
            error!("Drawing phase without a current drawer");
            return Err(DrawError::NotDrawing { phase: self.phase });
        };

        let receiver = {
            let candidates = self.candidates();
            let picked = match self.strategy {
                DrawStrategy::Sequential => candidates.choose(rng).map(|name| name.to_string()),
                DrawStrategy::Cycle => {
                    let planned = self.planned.get(self.assignments.len());
                    if let Some(planned) = planned {
                        if !candidates.contains(&planned.as_str()) {
                            error!("Planned receiver '{}' is not a legal candidate", planned);
                            return Err(DrawError::PlanMismatch {
                                receiver: planned.clone(),
                            });
                        }
                    }
                    planned.cloned()
                }
            };
            match picked {
                Some(name) => name,
                None => {
                    error!(
                        "No legal receiver for '{}' ({} remaining)",
                        drawer,
                        self.remaining_receivers.len()
                    );
                    return Err(DrawError::NoCandidates {
                        drawer,
                        remaining: self.remaining_receivers.len(),
                    });
                }
            }
        };

        Ok(self.commit(drawer, receiver))
    }

    fn commit(&mut self, giver: String, receiver: String) -> Assignment {
        debug!("Draw committed: {} -> {}", giver, receiver);
        self.remaining_receivers.retain(|name| *name != receiver);
        let assignment = Assignment::new(giver, receiver.clone());
        self.assignments.push(assignment.clone());

        if self.assignments.len() == self.participants.len() {
            self.phase = Phase::Finished;
            self.current_drawer = None;
            info!("Draw finished after {} assignments", self.assignments.len());
        } else {
            self.current_drawer = Some(receiver);
        }
        assignment
    }

    /// Run every outstanding draw and return the full assignment list.
    pub fn draw_all<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&[Assignment], DrawError> {
        while self.phase == Phase::Drawing {
            self.draw(rng)?;
        }
        Ok(&self.assignments)
    }
}

fn check_setup(participants: &[String], starting_drawer: &str) -> Result<(), DrawError> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(DrawError::TooFewParticipants {
            count: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for name in participants {
        if !seen.insert(name.as_str()) {
            return Err(DrawError::DuplicateParticipant { name: name.clone() });
        }
    }

    if !seen.contains(starting_drawer) {
        return Err(DrawError::UnknownStartingDrawer {
            name: starting_drawer.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

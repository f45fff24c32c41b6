// Game lifecycle: Input -> Drawing -> Finished -> Input.

use rand::Rng;
use tracing::info;

use super::assignment::Assignment;
use super::session::{DrawStrategy, Phase, Session};
use crate::error::DrawError;

/// Owns at most one session and drives the phase transitions around it.
///
/// With no session the game is in [`Phase::Input`]. `reset` discards the
/// session outright; a new game always starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct Game {
    session: Option<Session>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.session
            .as_ref()
            .map(Session::phase)
            .unwrap_or(Phase::Input)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Leave the input phase with a fresh session.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        participants: Vec<String>,
        starting_drawer: &str,
        strategy: DrawStrategy,
        rng: &mut R,
    ) -> Result<&Session, DrawError> {
        let phase = self.phase();
        if phase != Phase::Input {
            return Err(DrawError::SessionInProgress { phase });
        }
        let session = Session::start_with(participants, starting_drawer, strategy, rng)?;
        Ok(&*self.session.insert(session))
    }

    /// Commit the next draw of the running session.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Assignment, DrawError> {
        match self.session.as_mut() {
            Some(session) => session.draw(rng),
            None => Err(DrawError::NotDrawing {
                phase: Phase::Input,
            }),
        }
    }

    /// Drop any session and return to the input phase.
    pub fn reset(&mut self) -> Option<Session> {
        let discarded = self.session.take();
        if let Some(ref session) = discarded {
            info!(
                "Game reset in phase {} after {} draw(s)",
                session.phase(),
                session.assignments().len()
            );
        }
        discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn new_game_is_in_input_phase() {
        let game = Game::new();
        assert_eq!(game.phase(), Phase::Input);
        assert!(game.session().is_none());
    }

    #[test]
    fn full_lifecycle() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut game = Game::new();
        game.start(names(&["A", "B", "C"]), "A", DrawStrategy::Sequential, &mut rng)
            .unwrap();
        assert_eq!(game.phase(), Phase::Drawing);

        for _ in 0..3 {
            game.draw(&mut rng).unwrap();
        }
        assert_eq!(game.phase(), Phase::Finished);

        let discarded = game.reset().unwrap();
        assert_eq!(discarded.assignments().len(), 3);
        assert_eq!(game.phase(), Phase::Input);
    }

    #[test]
    fn draw_without_session_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::new();
        assert_eq!(
            game.draw(&mut rng).unwrap_err(),
            DrawError::NotDrawing {
                phase: Phase::Input
            }
        );
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::new();
        game.start(names(&["A", "B"]), "B", DrawStrategy::Cycle, &mut rng)
            .unwrap();
        let err = game
            .start(names(&["C", "D"]), "C", DrawStrategy::Cycle, &mut rng)
            .unwrap_err();
        assert_eq!(
            err,
            DrawError::SessionInProgress {
                phase: Phase::Drawing
            }
        );
        assert_eq!(game.session().unwrap().participants(), &names(&["A", "B"])[..]);
    }

    #[test]
    fn reset_mid_draw_discards_progress() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut game = Game::new();
        game.start(names(&["A", "B", "C", "D"]), "D", DrawStrategy::Sequential, &mut rng)
            .unwrap();
        game.draw(&mut rng).unwrap();
        game.reset();

        game.start(names(&["X", "Y"]), "Y", DrawStrategy::Sequential, &mut rng)
            .unwrap();
        let session = game.session().unwrap();
        assert!(session.assignments().is_empty());
        assert_eq!(session.current_drawer(), Some("Y"));
    }

    #[test]
    fn failed_start_stays_in_input() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut game = Game::new();
        let err = game
            .start(names(&["A"]), "A", DrawStrategy::Sequential, &mut rng)
            .unwrap_err();
        assert_eq!(err, DrawError::TooFewParticipants { count: 1 });
        assert_eq!(game.phase(), Phase::Input);
    }
}

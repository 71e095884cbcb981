//! Session dispatcher - routes player input and applies its effects
//!
//! Input starting with the system-command prefix is answered locally from
//! the world state. Everything else is a narrative turn: the backend sees a
//! snapshot taken *before* this turn is recorded, and the transcript gains
//! the input and the reply only once the backend has answered.
//!
//! Lifecycle: `CharacterPending -> Active -> Terminated`. `process` is only
//! accepted while `Active`.

use crate::application::ports::outbound::LlmPort;
use crate::application::services::narrative_service::NarrativeBackend;
use crate::application::services::system_commands::SystemCommand;
use crate::domain::entities::{CharacterSheet, WorldState, WorldStateError};
use crate::domain::value_objects::SessionId;

pub const DEATH_NOTICE: &str = "You have perished!";
pub const BACKEND_FAILURE_MESSAGE: &str = "Failed to process your input. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the character sheet
    CharacterPending,
    Active,
    /// Quit or died; no further input is accepted
    Terminated,
}

/// Uniform result of one dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub content: String,
    pub game_over: bool,
    pub error: bool,
}

impl CommandResult {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            game_over: false,
            error: false,
        }
    }

    pub fn game_over(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            game_over: true,
            error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            game_over: false,
            error: true,
        }
    }
}

/// Lifecycle violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No character has been created for this session yet")]
    CharacterPending,
    #[error("The session has ended")]
    Terminated,
    #[error(transparent)]
    WorldState(#[from] WorldStateError),
}

pub struct SessionDispatcher<L: LlmPort> {
    id: SessionId,
    state: SessionState,
    world: WorldState,
    backend: NarrativeBackend<L>,
}

impl<L: LlmPort> SessionDispatcher<L> {
    /// Take ownership of a world and a backend.
    ///
    /// The session starts `Active` if the world already carries a character,
    /// otherwise `CharacterPending`.
    pub fn new(world: WorldState, backend: NarrativeBackend<L>) -> Self {
        let state = if world.has_character() {
            SessionState::Active
        } else {
            SessionState::CharacterPending
        };
        let id = SessionId::new();
        tracing::info!(session_id = %id, genre = %world.genre(), "Session created");

        Self {
            id,
            state,
            world,
            backend,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn backend(&self) -> &NarrativeBackend<L> {
        &self.backend
    }

    /// Install the character sheet and open the session for play
    pub fn begin(&mut self, character: CharacterSheet) -> Result<(), SessionError> {
        match self.state {
            SessionState::Terminated => return Err(SessionError::Terminated),
            SessionState::Active => return Err(WorldStateError::CharacterAlreadySet.into()),
            SessionState::CharacterPending => {}
        }

        tracing::info!(session_id = %self.id, name = %character.name, "Character created");
        self.world.set_character(character)?;
        self.state = SessionState::Active;
        Ok(())
    }

    /// Process one line of player input
    #[tracing::instrument(skip(self, input), fields(session_id = %self.id))]
    pub async fn process(&mut self, input: &str) -> Result<CommandResult, SessionError> {
        match self.state {
            SessionState::CharacterPending => return Err(SessionError::CharacterPending),
            SessionState::Terminated => return Err(SessionError::Terminated),
            SessionState::Active => {}
        }

        let result = if SystemCommand::is_system_input(input) {
            self.run_system_command(input)
        } else {
            self.run_narrative_turn(input).await
        };

        if result.game_over {
            self.state = SessionState::Terminated;
        }
        Ok(result)
    }

    fn run_system_command(&self, input: &str) -> CommandResult {
        let command = SystemCommand::parse(input);
        tracing::debug!(?command, "System command");

        let content = command.render(&self.world);
        if command.ends_session() {
            tracing::info!("Player quit the session");
            CommandResult::game_over(content)
        } else {
            CommandResult::ok(content)
        }
    }

    async fn run_narrative_turn(&mut self, input: &str) -> CommandResult {
        let snapshot = self.world.snapshot();

        let effect = match self.backend.generate(&snapshot, input).await {
            Ok(effect) => effect,
            Err(e) => {
                tracing::warn!(error = %e, "Narrative turn failed");
                return CommandResult::error(BACKEND_FAILURE_MESSAGE);
            }
        };

        let alive = effect.health_delta == 0 || self.world.apply_damage(effect.health_delta);

        self.world.append_transcript(input);
        self.world.append_transcript(&effect.content);

        if alive {
            CommandResult::ok(effect.content)
        } else {
            tracing::info!(damage = effect.health_delta, "Player died");
            CommandResult::game_over(format!("{}\n\n{}", effect.content, DEATH_NOTICE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use crate::application::ports::outbound::{LlmError, LlmResponse, MockLlmPort};
    use crate::domain::entities::Sex;
    use crate::domain::value_objects::Genre;

    fn test_character() -> CharacterSheet {
        CharacterSheet {
            name: "Tamsin".to_string(),
            race: "Halfling".to_string(),
            sex: Sex::Female,
            age: 22,
            occupation: "Rogue".to_string(),
            description: "Quick hands, quicker smile.".to_string(),
            backstory: "Grew up picking pockets in the harbour.".to_string(),
        }
    }

    fn session(llm: MockLlmPort) -> SessionDispatcher<MockLlmPort> {
        let backend = NarrativeBackend::new(llm).with_min_interval(Duration::ZERO);
        let mut session = SessionDispatcher::new(WorldState::new(Genre::Fantasy), backend);
        session.begin(test_character()).unwrap();
        session
    }

    fn replying(content: &'static str) -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().returning(move |_| {
            Ok(LlmResponse {
                content: content.to_string(),
            })
        });
        llm
    }

    fn silent() -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        llm
    }

    #[tokio::test]
    async fn test_health_command() {
        let mut session = session(silent());
        let result = session.process(".health").await.unwrap();
        assert_eq!(result, CommandResult::ok("Current health: 100"));
    }

    #[tokio::test]
    async fn test_system_commands_never_reach_backend() {
        let mut session = session(silent());
        for input in [
            ".health", ".inventory", ".location", ".character", ".stats", ".help", ".HELP", ".dance",
        ] {
            let result = session.process(input).await.unwrap();
            assert!(!result.game_over, "{input}");
            assert!(!result.error, "{input}");
        }
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.world().transcript().is_empty());
    }

    #[tokio::test]
    async fn test_character_and_location_commands() {
        let mut session = session(silent());

        let result = session.process(".character").await.unwrap();
        assert!(result.content.contains("  Name: Tamsin"));
        assert!(result.content.contains("  Occupation: Rogue"));

        let result = session.process(".location").await.unwrap();
        assert_eq!(
            result.content,
            "Current location: In front of a ruined Wizard's Tower."
        );
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let mut session = session(silent());
        let result = session.process(".dance").await.unwrap();
        assert_eq!(
            result.content,
            "Unknown command: .dance. Type .help for available commands."
        );
        assert!(!result.game_over);
    }

    #[tokio::test]
    async fn test_quit_terminates_without_mutation() {
        let mut session = session(silent());
        let before = session.world().snapshot();

        let result = session.process(".Quit").await.unwrap();
        assert_eq!(result, CommandResult::game_over("Exiting game..."));
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.world().snapshot(), before);

        assert_eq!(
            session.process(".health").await,
            Err(SessionError::Terminated)
        );
    }

    #[tokio::test]
    async fn test_narrative_turn_updates_transcript() {
        let mut session = session(replying("You swing your sword at the goblin."));
        let result = session.process("attack goblin").await.unwrap();

        assert_eq!(result, CommandResult::ok("You swing your sword at the goblin."));
        assert_eq!(
            session.world().transcript(),
            "attack goblin\nYou swing your sword at the goblin.\n"
        );
    }

    #[tokio::test]
    async fn test_combat_damage() {
        let mut session = session(replying("The goblin hits you! HEALTH_SUBTRACT(20)"));
        let result = session.process("fight goblin").await.unwrap();

        assert_eq!(session.world().health(), 80);
        assert_eq!(result.content, "The goblin hits you! HEALTH_SUBTRACT(20)");
        assert!(!result.game_over);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_player_death() {
        let mut session = session(replying("The dragon breathes fire! HEALTH_SUBTRACT(100)"));
        let result = session.process("approach dragon").await.unwrap();

        assert_eq!(session.world().health(), 0);
        assert!(result.game_over);
        assert_eq!(
            result.content,
            "The dragon breathes fire! HEALTH_SUBTRACT(100)\n\nYou have perished!"
        );
        assert!(session.world().transcript().contains("approach dragon"));
        assert!(session.world().transcript().contains("The dragon breathes fire!"));
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(
            session.process("get up").await,
            Err(SessionError::Terminated)
        );
    }

    #[tokio::test]
    async fn test_backend_error_leaves_world_untouched() {
        let mut llm = MockLlmPort::new();
        let mut calls = 0;
        llm.expect_generate().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(LlmError::RequestFailed("API Error".to_string()))
            } else {
                Ok(LlmResponse {
                    content: "The mist clears.".to_string(),
                })
            }
        });

        let mut session = session(llm);
        let before = session.world().snapshot();

        let result = session.process("look around").await.unwrap();
        assert!(result.error);
        assert!(!result.game_over);
        assert_eq!(result.content, BACKEND_FAILURE_MESSAGE);
        assert_eq!(session.world().snapshot(), before);
        assert_eq!(session.state(), SessionState::Active);

        let result = session.process("look around").await.unwrap();
        assert_eq!(result, CommandResult::ok("The mist clears."));
    }

    #[tokio::test]
    async fn test_snapshot_taken_before_turn_is_recorded() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let mut llm = MockLlmPort::new();
        {
            let prompts = prompts.clone();
            llm.expect_generate().times(2).returning(move |request| {
                prompts.lock().unwrap().push(request.messages[0].content.clone());
                Ok(LlmResponse {
                    content: "You see a beautiful forest.".to_string(),
                })
            });
        }

        let mut session = session(llm);
        session.process("look around").await.unwrap();
        session.process("examine trees").await.unwrap();

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].starts_with("Transcript:\n\n\nCharacter:"));
        assert!(prompts[0].contains("Player Input:\nlook around"));
        assert!(prompts[1].starts_with(
            "Transcript:\nlook around\nYou see a beautiful forest.\n\n\nCharacter:"
        ));
        assert!(!prompts[1]
            .split("Player Input:")
            .next()
            .unwrap()
            .contains("examine trees"));

        let transcript = session.world().transcript();
        assert!(transcript.contains("look around"));
        assert!(transcript.contains("examine trees"));
    }

    #[tokio::test]
    async fn test_process_requires_character() {
        let backend = NarrativeBackend::new(silent());
        let mut session = SessionDispatcher::new(WorldState::new(Genre::Scifi), backend);
        assert_eq!(session.state(), SessionState::CharacterPending);
        assert_eq!(
            session.process(".health").await,
            Err(SessionError::CharacterPending)
        );

        session.begin(test_character()).unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(
            session.begin(test_character()),
            Err(SessionError::WorldState(WorldStateError::CharacterAlreadySet))
        );
    }
}

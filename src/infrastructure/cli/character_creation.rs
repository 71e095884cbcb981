//! Interactive character questionnaire

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite};

use super::Terminal;
use crate::application::ports::outbound::LlmPort;
use crate::application::services::llm::CharacterPromptKind;
use crate::application::services::CharacterService;
use crate::domain::entities::{
    resolve_age, resolve_occupation, resolve_race, resolve_sex, CharacterSheet, DEFAULT_RACE,
    MAX_AGE, MIN_AGE,
};
use crate::domain::value_objects::Genre;

/// Walk the player through building a character for `genre`
pub async fn create_character<R, W, L>(
    terminal: &mut Terminal<R, W>,
    genre: Genre,
    service: &CharacterService<L>,
) -> Result<CharacterSheet>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    L: LlmPort,
{
    terminal.say("\nCharacter Creation\n").await?;
    let profile = genre.profile();

    let name = ask_required(terminal, "Character name: ").await?;

    terminal.say("\nAvailable races:").await?;
    for (idx, race) in profile.races.iter().enumerate() {
        let marker = if *race == DEFAULT_RACE { " (default)" } else { "" };
        terminal.say(&format!("{}. {}{}", idx + 1, race, marker)).await?;
    }
    let answer = ask_line(
        terminal,
        &format!(
            "Choose race (1-{}, or press Enter for {}): ",
            profile.races.len(),
            DEFAULT_RACE
        ),
    )
    .await?;
    let race = resolve_race(genre, &answer);
    if race.rejected {
        terminal
            .say(&format!("Invalid choice. Using default race: {}", race.value))
            .await?;
    }

    terminal
        .say("\nChoose sex:\n1. Male\n2. Female\n3. Other")
        .await?;
    let sex = resolve_sex(&ask_line(terminal, "Enter choice (1-3): ").await?);
    if sex.rejected {
        terminal.say("Invalid choice. Using \"Other\"").await?;
    }

    let answer = ask_line(
        terminal,
        &format!(
            "\nEnter age ({}-{}, or press Enter for random): ",
            MIN_AGE, MAX_AGE
        ),
    )
    .await?;
    let age = resolve_age(&answer, &mut rand::thread_rng());
    if age.rejected {
        terminal
            .say(&format!(
                "Invalid age. Generating random age between {} and {}",
                MIN_AGE, MAX_AGE
            ))
            .await?;
    }

    terminal.say("\nAvailable occupations:").await?;
    for (idx, occupation) in profile.occupations.iter().enumerate() {
        terminal.say(&format!("{}. {}", idx + 1, occupation)).await?;
    }
    let answer = ask_line(
        terminal,
        &format!("Choose occupation (1-{}): ", profile.occupations.len()),
    )
    .await?;
    let occupation = resolve_occupation(genre, &answer);
    if occupation.rejected {
        terminal
            .say(&format!("Invalid choice. Using {}", occupation.value))
            .await?;
    }

    let mut character = CharacterSheet {
        name,
        race: race.value,
        sex: sex.value,
        age: age.value,
        occupation: occupation.value,
        ..CharacterSheet::default()
    };

    character.description =
        generate_text(terminal, service, CharacterPromptKind::Description, &character).await?;
    character.backstory =
        generate_text(terminal, service, CharacterPromptKind::Backstory, &character).await?;

    Ok(character)
}

/// Generate text until the player accepts it, falling back to manual entry on failure
async fn generate_text<R, W, L>(
    terminal: &mut Terminal<R, W>,
    service: &CharacterService<L>,
    kind: CharacterPromptKind,
    character: &CharacterSheet,
) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    L: LlmPort,
{
    terminal
        .say(&format!("\nGenerating character {}...", kind.as_str()))
        .await?;

    loop {
        match service.generate(kind, character).await {
            Ok(text) => {
                terminal
                    .say(&format!("\nGenerated {}:\n{}", kind.as_str(), text))
                    .await?;
                let answer = ask_line(terminal, "\nAccept this generation? (Y/n): ").await?;
                if answer.trim().eq_ignore_ascii_case("n") {
                    terminal
                        .say(&format!("\nRegenerating {}...", kind.as_str()))
                        .await?;
                    continue;
                }
                return Ok(text);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Character generation failed");
                return ask_required(
                    terminal,
                    &format!("Failed to generate {}. Please enter manually: ", kind.as_str()),
                )
                .await;
            }
        }
    }
}

async fn ask_line<R, W>(terminal: &mut Terminal<R, W>, prompt: &str) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    terminal
        .ask(prompt)
        .await?
        .context("Input closed during character creation")
}

/// Ask until the player gives a non-blank answer
async fn ask_required<R, W>(terminal: &mut Terminal<R, W>, prompt: &str) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    loop {
        let answer = ask_line(terminal, prompt).await?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        terminal
            .say("This field cannot be empty. Please try again.")
            .await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::application::ports::outbound::{LlmError, LlmResponse, MockLlmPort};
    use crate::domain::entities::Sex;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[tokio::test]
    async fn test_full_questionnaire() {
        let mut llm = MockLlmPort::new();
        let mut calls = 0;
        llm.expect_generate().times(3).returning(move |_| {
            calls += 1;
            Ok(LlmResponse {
                content: format!("draft {calls}"),
            })
        });
        let service = CharacterService::new(llm);

        // Empty name is re-asked; description rejected once, then accepted; backstory accepted.
        let mut terminal = terminal("\nLyra\n2\n2\n29\n3\nn\ny\n\n");
        let character = create_character(&mut terminal, Genre::Fantasy, &service)
            .await
            .unwrap();

        assert_eq!(
            character,
            CharacterSheet {
                name: "Lyra".to_string(),
                race: "Elf".to_string(),
                sex: Sex::Female,
                age: 29,
                occupation: "Rogue".to_string(),
                description: "draft 2".to_string(),
                backstory: "draft 3".to_string(),
            }
        );

        let output = String::from_utf8(terminal.into_writer()).unwrap();
        assert!(output.contains("Character Creation"));
        assert!(output.contains("This field cannot be empty."));
        assert!(output.contains("1. Human (default)"));
        assert!(output.contains("Regenerating description..."));
        assert!(!output.contains("Invalid"));
    }

    #[tokio::test]
    async fn test_defaults_and_manual_fallback() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("offline".to_string())));
        let service = CharacterService::new(llm);

        let mut terminal = terminal("Nova\n\nx\n\nzz\nA lean figure.\nBorn on a freighter.\n");
        let character = create_character(&mut terminal, Genre::Scifi, &service)
            .await
            .unwrap();

        assert_eq!(character.race, "Human");
        assert_eq!(character.sex, Sex::Other);
        assert!((MIN_AGE..=MAX_AGE).contains(&character.age));
        assert_eq!(character.occupation, "Pilot");
        assert_eq!(character.description, "A lean figure.");
        assert_eq!(character.backstory, "Born on a freighter.");

        // Blank race and age take their defaults quietly; bad sex and occupation answers are announced
        let output = String::from_utf8(terminal.into_writer()).unwrap();
        assert!(!output.contains("Using default race"));
        assert!(!output.contains("Invalid age"));
        assert!(output.contains("Invalid choice. Using \"Other\""));
        assert!(output.contains("Invalid choice. Using Pilot"));
    }

    #[tokio::test]
    async fn test_invalid_answers_are_announced() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(2).returning(|_| {
            Ok(LlmResponse {
                content: "Generated".to_string(),
            })
        });
        let service = CharacterService::new(llm);

        let mut terminal = terminal("Nova\n99\n5\n999\n99\ny\ny\n");
        let character = create_character(&mut terminal, Genre::Scifi, &service)
            .await
            .unwrap();

        assert_eq!(character.race, "Human");
        assert_eq!(character.sex, Sex::Other);
        assert!((MIN_AGE..=MAX_AGE).contains(&character.age));
        assert_eq!(character.occupation, "Pilot");

        let output = String::from_utf8(terminal.into_writer()).unwrap();
        assert!(output.contains("Invalid choice. Using default race: Human\n"));
        assert!(output.contains("Invalid choice. Using \"Other\"\n"));
        assert!(output.contains("Invalid age. Generating random age between 18 and 45\n"));
        assert!(output.contains("Invalid choice. Using Pilot\n"));
    }

    #[tokio::test]
    async fn test_answers_read_leading_digits() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(2).returning(|_| {
            Ok(LlmResponse {
                content: "Generated".to_string(),
            })
        });
        let service = CharacterService::new(llm);

        let mut terminal = terminal("Nova\n2abc\n1 \n40 years\n2.\n\n\n");
        let character = create_character(&mut terminal, Genre::Scifi, &service)
            .await
            .unwrap();

        assert_eq!(character.race, "Android");
        assert_eq!(character.sex, Sex::Male);
        assert_eq!(character.age, 40);
        assert_eq!(character.occupation, "Engineer");
    }

    #[tokio::test]
    async fn test_input_closed() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();
        let service = CharacterService::new(llm);

        let mut terminal = terminal("Nova\n");
        let err = create_character(&mut terminal, Genre::Scifi, &service)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Input closed"));
    }
}

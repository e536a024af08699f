// SPDX-FileCopyrightText: 2026 Arogya Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `arogya shell` command implementation.
//!
//! Launches an interactive chat REPL with colored output and readline
//! history. Signs in against the REST facade (or a local account file),
//! then drives a [`ChatSession`] per login: symptom in, bullet-point
//! advice out, with optional spoken playback of the replies.

use std::str::FromStr;
use std::sync::Arc;

use arogya_client::{ApiClient, ChatSession, LocalHistory, keyword_shortcuts, ui_text};
use arogya_config::model::ArogyaConfig;
use arogya_core::error::ArogyaError;
use arogya_core::traits::{CompletionProvider, HistoryStore, Recognizer};
use arogya_core::types::{Chat, ChatMessage, HealthCategory, Language, Sender};
use arogya_openrouter::OpenRouterProvider;
use arogya_speech::{NullRecognizer, NullSynthesizer, PlaybackController};
use arogya_translate::Translator;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Runs the `arogya shell` interactive REPL.
///
/// Authenticates, then prompts for symptoms and prints assistant replies.
/// Transcripts are saved through the configured history backend after every
/// successful exchange. `/logout` returns to the sign-in prompt.
pub async fn run_shell(config: ArogyaConfig) -> Result<(), ArogyaError> {
    let language = Language::from_str(&config.assistant.language).map_err(|_| {
        ArogyaError::Config(format!(
            "unknown assistant.language: {}",
            config.assistant.language
        ))
    })?;
    let category = HealthCategory::from_str(&config.assistant.category).map_err(|_| {
        ArogyaError::Config(format!(
            "unknown assistant.category: {}",
            config.assistant.category
        ))
    })?;

    // Initialize OpenRouter provider.
    let provider: Arc<dyn CompletionProvider> =
        Arc::new(OpenRouterProvider::new(&config).inspect_err(|_| {
            eprintln!(
                "error: OpenRouter API key required. Set via config or OPENROUTER_API_KEY env var"
            );
        })?);

    let playback = config
        .speech
        .enabled
        .then(|| PlaybackController::new(Arc::new(NullSynthesizer), config.speech.words_per_minute));
    let recognizer: Option<Arc<dyn Recognizer>> = config
        .speech
        .enabled
        .then(|| Arc::new(NullRecognizer) as Arc<dyn Recognizer>);

    // Set up readline editor.
    let mut rl = DefaultEditor::new()
        .map_err(|e| ArogyaError::Internal(format!("failed to initialize readline: {e}")))?;

    'login: loop {
        // Sign in before anything else; chats are keyed by account email.
        let Some((history, email)) = authenticate(&config, &mut rl).await? else {
            break;
        };

        // Translation of romanized Gujarati input, when enabled.
        let translator = if config.translate.enabled {
            Some(Translator::new(config.translate.base_url.clone())?)
        } else {
            None
        };

        let mut session = ChatSession::new(
            provider.clone(),
            history,
            translator,
            email,
            language,
            category,
        );

        // Print welcome message.
        let ui = ui_text(session.language());
        println!("{}", ui.title.bold().green());
        println!("{}", ui.description);
        print_shortcuts(session.language());
        println!(
            "Type {} for commands, {} to exit.\n",
            "/help".yellow(),
            "/quit".yellow()
        );

        // Chats from the last /history listing, for /open and /delete.
        let mut listed: Vec<Chat> = Vec::new();

        // REPL loop.
        let prompt = format!("{}> ", config.agent.name.green());
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == "/quit" || trimmed == "/exit" {
                        break 'login;
                    }
                    if trimmed == "/logout" {
                        if let Some(playback) = &playback {
                            playback.stop().await;
                        }
                        println!("{}", "logged out".dimmed());
                        continue 'login;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(&line);

                    if let Err(e) = handle_line(
                        &mut session,
                        playback.as_ref(),
                        recognizer.as_deref(),
                        &mut listed,
                        trimmed,
                    )
                    .await
                    {
                        eprintln!("{}: {e}", "error".red());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    break 'login;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    break 'login;
                }
                Err(e) => {
                    eprintln!("{}: {e}", "error".red());
                    break 'login;
                }
            }
        }
    }

    if let Some(playback) = &playback {
        playback.stop().await;
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Signs the user in, creating the account first if asked.
///
/// Returns the history backend bound to the signed-in account, or `None`
/// when the user aborts the prompt.
async fn authenticate(
    config: &ArogyaConfig,
    rl: &mut DefaultEditor,
) -> Result<Option<(Arc<dyn HistoryStore>, String)>, ArogyaError> {
    // Local mode keeps one store across attempts so a fresh signup and the
    // login that follows see the same file.
    let local: Option<Arc<LocalHistory>> = match config.history.mode.as_str() {
        "local" => Some(Arc::new(LocalHistory::open(&config.history.local_path).await?)),
        "remote" => None,
        other => {
            return Err(ArogyaError::Config(format!("unknown history.mode: {other}")));
        }
    };

    loop {
        let action = match prompt_line(rl, "login or signup [login]: ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        let signup = match action.as_str() {
            "" | "login" => false,
            "signup" => true,
            other => {
                eprintln!("{}: unknown choice {other}", "error".red());
                continue;
            }
        };

        let Some(email) = prompt_line(rl, "email: ")? else {
            return Ok(None);
        };
        if email.is_empty() {
            continue;
        }
        let password = rpassword::prompt_password("password: ")
            .map_err(|e| ArogyaError::Internal(format!("failed to read password: {e}")))?;

        let attempt: Result<(Arc<dyn HistoryStore>, String), ArogyaError> = match &local {
            Some(store) => {
                async {
                    if signup {
                        store.signup(&email, &password).await?;
                        println!("{}", "User created".green());
                    }
                    store.login(&email, &password).await?;
                    Ok((Arc::clone(store) as Arc<dyn HistoryStore>, email.clone()))
                }
                .await
            }
            None => {
                let mut client = ApiClient::new(config.history.server_url.clone())?;
                async {
                    if signup {
                        client.signup(&email, &password).await?;
                        println!("{}", "User created".green());
                    }
                    let email = client.login(&email, &password).await?;
                    Ok((Arc::new(client) as Arc<dyn HistoryStore>, email))
                }
                .await
            }
        };

        match attempt {
            Ok(pair) => {
                println!("{}", "Login successful".green());
                return Ok(Some(pair));
            }
            Err(ArogyaError::Auth(msg)) => {
                eprintln!("{}: {msg}", "error".red());
            }
            Err(e) => return Err(e),
        }
    }
}

/// Reads one trimmed line, mapping Ctrl+C/Ctrl+D to `None`.
fn prompt_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>, ArogyaError> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(ArogyaError::Internal(format!("readline failed: {e}"))),
    }
}

/// Dispatches one REPL line: a slash command, a keyword shortcut digit, or
/// a symptom message for the assistant.
async fn handle_line(
    session: &mut ChatSession,
    playback: Option<&PlaybackController>,
    recognizer: Option<&dyn Recognizer>,
    listed: &mut Vec<Chat>,
    line: &str,
) -> Result<(), ArogyaError> {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/help" => {
            print_help();
        }
        "/about" => {
            let ui = ui_text(session.language());
            println!("{}", ui.title.bold().green());
            println!("{}", ui.description);
            println!("{}", format!("signed in as {}", session.email()).dimmed());
            println!(
                "{}",
                format!(
                    "language: {}  topic: {}",
                    session.language().label(),
                    session.category().label(session.language())
                )
                .dimmed()
            );
        }
        "/new" => {
            if let Some(playback) = playback {
                playback.stop().await;
            }
            session.reset();
            println!("{}", "new chat".dimmed());
        }
        "/history" => {
            *listed = session.list_history().await?;
            if listed.is_empty() {
                println!("{}", "no saved chats".dimmed());
            }
            for (i, chat) in listed.iter().enumerate() {
                println!(
                    "{} {} {}",
                    format!("[{}]", i + 1).yellow(),
                    chat.title,
                    chat.created_at.dimmed()
                );
            }
        }
        "/open" => {
            let chat = pick(listed, rest)?;
            session.open_chat(chat.clone());
            for message in session.messages() {
                print_message(message);
            }
        }
        "/delete" => {
            let id = pick(listed, rest)?.id.clone();
            session.delete_from_history(&id).await?;
            listed.retain(|c| c.id != id);
            println!("{}", "Chat deleted".dimmed());
        }
        "/lang" => {
            let language = Language::from_str(rest)
                .map_err(|_| ArogyaError::Config(format!("unknown language: {rest}")))?;
            session.set_language(language);
            print_shortcuts(language);
        }
        "/category" => {
            let category = HealthCategory::from_str(rest)
                .map_err(|_| ArogyaError::Config(format!("unknown category: {rest}")))?;
            session.set_category(category);
            println!(
                "{}",
                format!("category: {}", category.label(session.language())).dimmed()
            );
        }
        "/say" => {
            let Some(playback) = playback else {
                eprintln!("{}: speech is disabled", "error".red());
                return Ok(());
            };
            let Some((id, message)) = session
                .messages()
                .iter()
                .enumerate()
                .rev()
                .find(|(_, m)| m.sender == Sender::Bot)
            else {
                eprintln!("{}: nothing to speak yet", "error".red());
                return Ok(());
            };
            let lang = message
                .audio_lang
                .clone()
                .unwrap_or_else(|| session.language().speech_tag().to_string());
            let text = message.text.clone();
            if playback.toggle(id, &text, &lang).await? {
                println!("{}", "(speaking)".dimmed());
            } else {
                println!("{}", "(stopped)".dimmed());
            }
        }
        "/stop" => {
            if let Some(playback) = playback {
                playback.stop().await;
            }
        }
        "/listen" => {
            let Some(recognizer) = recognizer else {
                eprintln!("{}: speech is disabled", "error".red());
                return Ok(());
            };
            match recognizer
                .recognize_once(session.language().speech_tag())
                .await?
            {
                Some(text) => {
                    println!("{} {}", "heard:".dimmed(), text);
                    send_and_print(session, &text).await;
                }
                None => {
                    println!("{}", "(heard nothing)".dimmed());
                }
            }
        }
        _ => {
            // A bare digit picks the matching keyword shortcut.
            let shortcuts = keyword_shortcuts(session.language());
            let input = match line.parse::<usize>() {
                Ok(n) if (1..=shortcuts.len()).contains(&n) => shortcuts[n - 1],
                _ => line,
            };
            send_and_print(session, input).await;
        }
    }

    Ok(())
}

async fn send_and_print(session: &mut ChatSession, input: &str) {
    println!("{}", ui_text(session.language()).typing.dimmed());
    if let Some(bot) = session.send(input).await {
        print_message(&bot);
    }
}

/// Resolves a one-based index from the last `/history` listing.
fn pick<'a>(listed: &'a [Chat], arg: &str) -> Result<&'a Chat, ArogyaError> {
    let index: usize = arg
        .parse()
        .map_err(|_| ArogyaError::Internal("expected a chat number from /history".to_string()))?;
    index
        .checked_sub(1)
        .and_then(|i| listed.get(i))
        .ok_or_else(|| ArogyaError::Internal(format!("no chat [{index}]; run /history first")))
}

fn print_message(message: &ChatMessage) {
    match message.sender {
        Sender::User => println!("{} {}", "you:".bold(), message.text),
        Sender::Bot => println!("{} {}", "bot:".bold().cyan(), message.text),
    }
}

fn print_shortcuts(language: Language) {
    let shortcuts = keyword_shortcuts(language)
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {s}", format!("[{}]", i + 1).yellow()))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{shortcuts}");
}

fn print_help() {
    println!("  /new              start a fresh chat");
    println!("  /history          list saved chats");
    println!("  /open <n>         reopen a chat from /history");
    println!("  /delete <n>       delete a chat from /history");
    println!("  /lang <code>      switch reply language (en, hi, mr, gu, te)");
    println!("  /category <name>  switch health topic (general, children, elderly, maternity, covid)");
    println!("  /say              toggle spoken playback of the last reply");
    println!("  /stop             stop playback");
    println!("  /listen           dictate a message through the recognizer");
    println!("  /about            show assistant info and the signed-in account");
    println!("  /logout           return to the sign-in prompt");
    println!("  /quit             exit");
    println!("  1-5               send a keyword shortcut");
}

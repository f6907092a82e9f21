// src/cli/practice.rs — Interactive practice REPL

use std::sync::Arc;

use tokio::sync::mpsc;

use super::render;
use crate::infra::config::Config;
use crate::interview::InterviewWorkflow;
use crate::session::{ChatPhase, ChatState, SessionController, UiEvent};
use crate::voice::{self, VoiceInput};

enum Flow {
    Continue,
    Quit,
}

/// Run the interactive practice REPL.
pub async fn run_practice(
    workflow: Arc<InterviewWorkflow>,
    config: &Config,
    topic: Option<String>,
) -> anyhow::Result<()> {
    let session_count = workflow.session_count().await.unwrap_or(0);
    let voice = voice::voice_from_config(&config.voice);
    let (controller, mut events) =
        SessionController::new(workflow.clone(), config.provider.api_key_env.clone());

    if let Some(t) = topic {
        controller.on_topic_changed(t);
    }

    eprintln!(
        "interview-coach v{} | {}/{} | {} past session(s)\n",
        env!("CARGO_PKG_VERSION"),
        config.provider.id,
        workflow.settings().model,
        session_count,
    );
    eprintln!("Enter a topic (blank for \"{}\"). /help for commands.\n", workflow.settings().default_topic);

    // Bubble ids are monotonic, so anything at or past this id is unseen.
    let mut next_unprinted: u64 = 0;

    loop {
        let phase = controller.snapshot().phase;
        let Some(input) = read_input(prompt_for(phase)) else {
            break;
        };
        let trimmed = input.trim();

        if trimmed == "quit" || trimmed == "exit" {
            break;
        }

        if trimmed.starts_with('/') {
            let flow =
                handle_slash_command(trimmed, &controller, voice.as_deref(), config).await;
            if let Flow::Quit = flow {
                break;
            }
        } else {
            match phase {
                ChatPhase::Idle => {
                    if !trimmed.is_empty() {
                        controller.on_topic_changed(trimmed);
                    }
                    controller.start_practice();
                }
                ChatPhase::AwaitingAnswer => {
                    controller.on_answer_changed(trimmed);
                    if !controller.submit_answer() {
                        eprintln!("  Type an answer first, or /voice to dictate one.");
                    }
                }
                ChatPhase::Scored => {
                    if !trimmed.is_empty() {
                        controller.on_topic_changed(trimmed);
                    }
                    controller.practice_another();
                }
                ChatPhase::LoadingQuestion | ChatPhase::LoadingScore => {}
            }
        }

        if controller.snapshot().phase.is_loading() {
            eprintln!("  ...");
        }
        let state = controller.settled().await;
        next_unprinted = print_new_bubbles(&state, next_unprinted);
        drain_events(&mut events);
    }

    let stats = controller.snapshot().session_stats;
    eprintln!("\n{}", render::format_stats(&stats));
    Ok(())
}

fn prompt_for(phase: ChatPhase) -> &'static str {
    match phase {
        ChatPhase::Idle => "topic> ",
        ChatPhase::AwaitingAnswer => "answer> ",
        ChatPhase::Scored => "next> ",
        ChatPhase::LoadingQuestion | ChatPhase::LoadingScore => "> ",
    }
}

fn print_new_bubbles(state: &ChatState, next_unprinted: u64) -> u64 {
    for bubble in state.messages.iter().filter(|b| b.id >= next_unprinted) {
        println!("{}\n", render::format_bubble(bubble));
    }
    state.next_bubble_id
}

fn drain_events(events: &mut mpsc::UnboundedReceiver<UiEvent>) {
    while let Ok(event) = events.try_recv() {
        match event {
            UiEvent::ShowToast(message) => eprintln!("  ! {message}"),
            // Terminal output is already line-by-line.
            UiEvent::DismissKeyboard | UiEvent::ScrollToBottom => {}
        }
    }
}

fn read_input(prompt: &str) -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("{prompt}");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

async fn handle_slash_command(
    input: &str,
    controller: &SessionController,
    voice: Option<&dyn VoiceInput>,
    config: &Config,
) -> Flow {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/history" => {
            controller.on_toggle_history();
            let state = controller.snapshot();
            if !state.history_expanded {
                eprintln!("  History hidden.");
            } else if state.past_sessions.is_empty() {
                eprintln!("  No past sessions yet.");
            } else {
                let limit = config.interview.history_limit as usize;
                eprintln!(
                    "  Past sessions ({} of {}):",
                    state.past_sessions.len().min(limit),
                    state.past_sessions.len()
                );
                for s in state.past_sessions.iter().take(limit) {
                    eprintln!("{}", render::format_session_line(s));
                }
            }
        }

        "/stats" => {
            eprintln!("{}", render::format_stats(&controller.snapshot().session_stats));
        }

        "/delete" => match arg.parse::<i64>() {
            Ok(id) => match controller.delete_session(id).await {
                Ok(true) => eprintln!("  Deleted session #{id}."),
                Ok(false) => {}
                Err(e) => tracing::warn!("delete task failed: {e}"),
            },
            Err(_) => eprintln!("  Usage: /delete <id>"),
        },

        "/voice" => dictate(controller, voice).await,

        "/another" => {
            if !controller.practice_another() {
                eprintln!("  Finish the current question first.");
            }
        }

        "/reset" => {
            controller.reset();
            eprintln!("  Session cleared. Enter a topic to start again.");
        }

        "/topic" => {
            if arg.is_empty() {
                let current = controller.snapshot().topic_input;
                if current.trim().is_empty() {
                    eprintln!("  Topic: (default) {}", config.interview.default_topic);
                } else {
                    eprintln!("  Topic: {current}");
                }
                eprintln!("  Usage: /topic <topic>");
            } else {
                controller.on_topic_changed(arg);
                eprintln!("  Topic set to {arg}");
            }
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /history           Show or hide past sessions");
            eprintln!("  /stats             Show session count and average score");
            eprintln!("  /delete <id>       Delete a past session");
            eprintln!("  /voice             Dictate your answer");
            eprintln!("  /another           Ask another question after scoring");
            eprintln!("  /reset             Clear the conversation");
            eprintln!("  /topic [topic]     Show or set the topic");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  End session");
        }

        "/quit" => return Flow::Quit,

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
    Flow::Continue
}

async fn dictate(controller: &SessionController, voice: Option<&dyn VoiceInput>) {
    let Some(voice) = voice else {
        eprintln!("  No voice command configured. Set [voice] command in config.toml.");
        return;
    };
    if controller.snapshot().phase != ChatPhase::AwaitingAnswer {
        eprintln!("  There is no question waiting for an answer.");
        return;
    }

    eprintln!("  Listening...");
    let text = match voice.listen_once().await {
        Ok(Some(text)) => text,
        Ok(None) => {
            eprintln!("  Nothing was recognized.");
            return;
        }
        Err(e) => {
            eprintln!("  Voice input failed: {e}");
            return;
        }
    };

    println!("  heard: {text}");
    let submit = inquire::Confirm::new("Submit this answer?")
        .with_default(true)
        .prompt()
        .unwrap_or(false);

    if submit {
        controller.on_voice_result(text);
        controller.submit_answer();
    } else {
        eprintln!("  Discarded.");
    }
}

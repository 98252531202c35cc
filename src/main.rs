//! Terminal front end for the essay interview.
//!
//! Commands at the answer prompt:
//! - `/transcribe <file.wav>` - transcribe a recording into a draft answer
//! - `/accept` - submit the current draft
//! - `/retry` - re-fetch a question after a failed request
//! - `/quit` - stop the interview and write the transcript

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use essay_interview::adapters::{
    FileTranscriptSink, HttpDocumentExtractor, HttpQuestionService, HttpSpeechSynthesizer,
    HttpTranscriber, ServiceApiClient,
};
use essay_interview::application::{InterviewController, SpeechDispatcher, SpokenQuestion};
use essay_interview::config::{AppConfig, ConfigError, OutputConfig};
use essay_interview::domain::interview::{SessionState, Track};
use essay_interview::ports::{AudioClip, UploadedFile};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    init_tracing(&config.output);

    let client = ServiceApiClient::new(config.service.to_client_config())?;
    tracing::info!(base_url = %client.config().base_url, "Configuration loaded");

    let controller = InterviewController::new(Arc::new(HttpQuestionService::new(client.clone())))
        .with_thresholds(config.interview.thresholds())
        .with_transcriber(Arc::new(HttpTranscriber::new(client.clone())))
        .with_document_extractor(Arc::new(HttpDocumentExtractor::new(client.clone())))
        .with_transcript_sink(Arc::new(FileTranscriptSink::new(
            config.output.transcript_path.clone(),
        )));

    let speech = if config.service.speech_enabled {
        let (dispatcher, receiver) =
            SpeechDispatcher::new(Arc::new(HttpSpeechSynthesizer::new(client.clone())), 4);
        tokio::spawn(drain_audio(receiver));
        Some(dispatcher)
    } else {
        None
    };

    let mut input = BufReader::new(io::stdin()).lines();

    let Some(track) = choose_track(&mut input).await? else {
        return Ok(());
    };
    let cv_text = load_cv(&controller, &mut input).await?;

    let Some(mut session) = start_session(&controller, track, &cv_text, &mut input).await? else {
        return Ok(());
    };

    run_turns(&controller, speech.as_ref(), &mut session, &mut input).await?;

    println!("\n{}", controller.render_transcript(&session));
    match controller.export_transcript(&session).await {
        Ok(location) => println!("Transcript saved to {location}"),
        Err(e) => eprintln!("Could not save transcript: {e}"),
    }

    Ok(())
}

fn init_tracing(output: &OutputConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(output.log_level.to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if output.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>, Box<dyn Error>> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?)
}

async fn choose_track(input: &mut Input) -> Result<Option<Track>, Box<dyn Error>> {
    println!("Choose an interview track:");
    for (i, track) in Track::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, track);
    }

    loop {
        let Some(line) = prompt(input, "> ").await? else {
            return Ok(None);
        };
        match line.parse::<Track>() {
            Ok(track) => return Ok(Some(track)),
            Err(e) => println!("{e}"),
        }
    }
}

/// Asks for a CV file. A blank path, unreadable file or failed extraction
/// continues without a CV.
async fn load_cv(
    controller: &InterviewController,
    input: &mut Input,
) -> Result<String, Box<dyn Error>> {
    let Some(line) = prompt(input, "Path to your CV (blank to skip): ").await? else {
        return Ok(String::new());
    };
    let path = line.trim();
    if path.is_empty() {
        return Ok(String::new());
    }

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read {path}: {e}. Continuing without a CV.");
            return Ok(String::new());
        }
    };
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    match controller.extract_cv(UploadedFile::new(file_name, bytes)).await {
        Ok(text) => {
            println!("CV uploaded.");
            Ok(text)
        }
        Err(e) => {
            println!("CV extraction failed ({e}). Continuing without a CV.");
            Ok(String::new())
        }
    }
}

async fn start_session(
    controller: &InterviewController,
    track: Track,
    cv_text: &str,
    input: &mut Input,
) -> Result<Option<SessionState>, Box<dyn Error>> {
    loop {
        match controller.start(track, cv_text).await {
            Ok(session) => return Ok(Some(session)),
            Err(e) => {
                println!("Could not start the interview: {e}");
                let answer = prompt(input, "Try again? [y/N] ").await?;
                if !answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")) {
                    return Ok(None);
                }
            }
        }
    }
}

async fn run_turns(
    controller: &InterviewController,
    speech: Option<&SpeechDispatcher>,
    session: &mut SessionState,
    input: &mut Input,
) -> Result<(), Box<dyn Error>> {
    let mut draft = String::new();
    let mut announce = true;

    while !session.is_finished() {
        let label = if session.awaiting_question() {
            "(/retry or /quit) > ".to_string()
        } else {
            if announce {
                println!(
                    "\nQuestion {}: {}",
                    session.turns_answered() + 1,
                    session.current_question().text
                );
                if let Some(speech) = speech {
                    speech.announce(session);
                }
                announce = false;
            }
            "> ".to_string()
        };

        let Some(line) = prompt(input, &label).await? else {
            controller.abort(session);
            break;
        };
        let line = line.trim();

        let result = match line.split_once(' ').map_or((line, ""), |(c, rest)| (c, rest.trim())) {
            ("/quit", _) => {
                controller.abort(session);
                Ok(())
            }
            ("/retry", _) => controller.retry_fetch(session).await,
            ("/transcribe", path) => {
                match transcribe_file(controller, path).await {
                    Some(text) => {
                        println!("Draft: {text}\n(/accept to submit, or type your own answer)");
                        draft = text;
                    }
                    None => println!("Transcription failed; please type your answer."),
                }
                continue;
            }
            ("/accept", _) => {
                let answer = std::mem::take(&mut draft);
                controller.submit_answer(session, &answer).await
            }
            _ if line.is_empty() => continue,
            _ => controller.submit_answer(session, line).await,
        };

        match result {
            Ok(()) => {
                draft.clear();
                announce = true;
            }
            Err(e) if e.is_retryable() => println!("{e}. Type /retry to try again."),
            Err(e) => println!("{e}"),
        }
    }

    if let (Some(reason), Some(finished_at)) = (session.finish_reason(), session.finished_at()) {
        tracing::info!(
            session_id = %session.id(),
            reason = ?reason,
            turns = session.turns_answered(),
            elapsed_secs = finished_at.duration_since(&session.started_at()).num_seconds(),
            "Interview complete"
        );
    }
    Ok(())
}

async fn transcribe_file(controller: &InterviewController, path: &str) -> Option<String> {
    let bytes = tokio::fs::read(path).await.ok()?;
    controller
        .transcribe_answer(AudioClip::new(bytes).with_content_type("audio/wav"))
        .await
        .ok()
}

/// Audio playback is not available in a terminal; received clips are only logged.
async fn drain_audio(mut receiver: mpsc::Receiver<SpokenQuestion>) {
    while let Some(spoken) = receiver.recv().await {
        tracing::debug!(
            session_id = %spoken.session_id,
            bytes = spoken.audio.bytes.len(),
            "Question audio received"
        );
    }
}

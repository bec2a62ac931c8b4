use bookchat::cli::{parse_args, render, run_cli_command, ChatArgs, CliCommand};
use bookchat::client::BackendClient;
use bookchat::conversation::Conversation;
use bookchat::error::BookChatResult;
use bookchat::logging::init_tracing;
use bookchat::sse::{StreamCollector, StreamEvent, StreamOutcome};
use bookchat::traits::HttpClient;

use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// What one turn printed, and whether it produced an answer.
struct Turn {
    output: String,
    answered: bool,
}

/// Run one exchange over the streaming endpoint, printing progress to stderr.
///
/// A completed answer is added to `conversation`.
async fn streamed_turn<C: HttpClient>(
    client: &BackendClient<C>,
    conversation: &mut Conversation,
    question: &str,
) -> BookChatResult<Turn> {
    let request = conversation.request_for(question);
    let mut collector = StreamCollector::new();

    let summary = client
        .stream_message_with(&request, |event| {
            if let StreamEvent::Log(ref record) = event {
                if !collector.is_finished() {
                    eprintln!("{}", render::log_line(record));
                }
            }
            collector.observe(event);
        })
        .await?;
    debug!(
        delivered = summary.delivered,
        malformed = summary.malformed,
        "turn finished"
    );

    let chat = collector.finish()?;
    if chat.unknown_events > 0 {
        debug!(count = chat.unknown_events, "ignored unknown events");
    }
    let output = match chat.outcome {
        StreamOutcome::Completed(ref response) => render::answer(response),
        StreamOutcome::Failed { ref message } => format!("Error: {}", message),
    };
    let answered = conversation.record_collected(question, &chat);
    Ok(Turn { output, answered })
}

/// Run one exchange over the plain endpoint.
async fn plain_turn<C: HttpClient>(
    client: &BackendClient<C>,
    conversation: &mut Conversation,
    question: &str,
) -> BookChatResult<Turn> {
    let response = client
        .send_message(&conversation.request_for(question))
        .await?;
    let output = render::answer(&response);
    conversation.record_exchange(question, response.message);
    Ok(Turn {
        output,
        answered: true,
    })
}

/// Ask one question, print the outcome, and record it in the history.
///
/// Returns false when the turn failed.
async fn ask<C: HttpClient>(
    client: &BackendClient<C>,
    conversation: &mut Conversation,
    args: &ChatArgs,
    question: &str,
) -> bool {
    let turn = if args.no_stream {
        plain_turn(client, conversation, question).await
    } else {
        streamed_turn(client, conversation, question).await
    };

    match turn {
        Ok(turn) => {
            println!("{}", turn.output);
            turn.answered
        }
        Err(err) => {
            warn!(code = err.error_code(), error = %err, "turn failed");
            eprintln!("{}", err.user_message());
            if err.is_retryable() {
                eprintln!("Hint: {}", err.recovery_hint());
            }
            false
        }
    }
}

async fn interactive<C: HttpClient>(client: &BackendClient<C>, args: &ChatArgs) -> Result<()> {
    let mut conversation = Conversation::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("Ask about books (empty line or Ctrl-D to quit).");
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            break;
        }
        ask(client, &mut conversation, args, question).await;
        println!();
    }
    debug!(exchanges = conversation.exchange_count(), "session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args());
    if let Some(code) = run_cli_command(&command) {
        std::process::exit(code);
    }
    let CliCommand::Chat(args) = command else {
        return Ok(());
    };

    init_tracing();
    let client = BackendClient::from_env()?;
    debug!(base_url = client.base_url(), "client ready");

    match args.message.as_deref() {
        Some(question) => {
            let mut conversation = Conversation::new();
            if !ask(&client, &mut conversation, &args, question).await {
                std::process::exit(1);
            }
        }
        None => interactive(&client, &args).await?,
    }

    Ok(())
}

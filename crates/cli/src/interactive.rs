//! Interactive mode: the tokio driver fed from stdin in real time.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use searchbox_core::{spawn_search_box, SearchBoxClosed, SearchBoxConfig, SearchBoxHandle};

/// Each stdin line is the new full input text. `:enter`, `:clear` and `:quit`
/// are commands. Commits are echoed back as the caller's authoritative text
/// (see [`echo_commit`]).
pub async fn run(config: SearchBoxConfig, authoritative: String, json: bool) {
    let (commit_tx, mut commits) = mpsc::unbounded_channel::<String>();
    let handle = spawn_search_box(&config, authoritative, move |text: &str| {
        let _ = commit_tx.send(text.to_string());
    });

    eprintln!(
        "Type a query per line (debounce {}ms, min {} chars). :enter, :clear, :quit",
        config.debounce_ms, config.min_commit_len
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("Could not read stdin: {e}");
                        break;
                    }
                };
                let sent = match line.as_str() {
                    ":quit" => break,
                    ":enter" => handle.confirm(),
                    ":clear" => handle.clear(),
                    text => handle.edit(text),
                };
                if let Err(e) = sent {
                    eprintln!("{e}");
                    break;
                }
            }
            Some(text) = commits.recv() => {
                if json {
                    println!("{}", serde_json::json!({ "commit": text }));
                } else {
                    println!("commit {text:?}");
                }
                if let Err(e) = echo_commit(&handle, &text).await {
                    eprintln!("{e}");
                    break;
                }
            }
        }
    }

    handle.shutdown().await;
}

/// Report a finished search back as the caller's authoritative text.
///
/// The echo is skipped when the input no longer shows `committed`: a line
/// typed between the commit and its echo would otherwise be replaced by the
/// resync and its pending timer cancelled. The skipped text is not lost; the
/// newer edit commits on its own and is echoed then. Returns whether the echo
/// was applied.
pub async fn echo_commit(handle: &SearchBoxHandle, committed: &str) -> Result<bool, SearchBoxClosed> {
    let snapshot = handle.snapshot().await?;
    if snapshot.display_text != committed {
        tracing::debug!(
            committed,
            display = snapshot.display_text.as_str(),
            "Input moved on since the commit, skipping echo"
        );
        return Ok(false);
    }
    handle.external_text_changed(committed)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::sleep;

    fn spawn(authoritative: &str) -> (SearchBoxHandle, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_search_box(&SearchBoxConfig::default(), authoritative, move |t: &str| {
            let _ = tx.send(t.to_string());
        });
        (handle, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn echo_applies_when_input_still_shows_the_commit() {
        let (handle, mut rx) = spawn("");
        handle.edit("abc").unwrap();
        sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.recv().await.as_deref(), Some("abc"));

        assert!(echo_commit(&handle, "abc").await.unwrap());
        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.authoritative_text, "abc");
        assert_eq!(snap.display_text, "abc");
        assert!(!snap.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_after_a_commit_survives_the_echo() {
        let (handle, mut rx) = spawn("");
        handle.edit("abc").unwrap();
        sleep(Duration::from_millis(600)).await;
        let committed = rx.recv().await.unwrap();
        assert_eq!(committed, "abc");

        // The user keeps typing before the caller reports the search finished.
        handle.edit("abcd").unwrap();
        assert!(!echo_commit(&handle, &committed).await.unwrap());

        let snap = handle.snapshot().await.unwrap();
        assert_eq!(snap.display_text, "abcd");
        assert_eq!(snap.authoritative_text, "");
        assert!(snap.pending);

        // The newer edit still commits on its own.
        sleep(Duration::from_millis(600)).await;
        assert_eq!(rx.recv().await.as_deref(), Some("abcd"));
        assert!(echo_commit(&handle, "abcd").await.unwrap());
        assert_eq!(handle.snapshot().await.unwrap().authoritative_text, "abcd");
    }
}

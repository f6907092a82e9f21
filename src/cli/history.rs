// src/cli/history.rs — `history` and `stats` commands
//
// These only touch the store, so they work without an API key.

use super::render;
use crate::interview::ChatSession;
use crate::memory::StoreHandle;
use crate::session::SessionStats;

pub async fn run_history(
    store: &StoreHandle,
    limit: u32,
    delete: Option<i64>,
    yes: bool,
) -> anyhow::Result<()> {
    if let Some(id) = delete {
        return delete_one(store, id, yes).await;
    }

    let sessions: Vec<ChatSession> = store
        .recent_sessions(limit)
        .await?
        .into_iter()
        .map(ChatSession::from)
        .collect();

    if sessions.is_empty() {
        eprintln!("No sessions yet. Run `interview-coach` to start practicing.");
        return Ok(());
    }

    println!("Recent sessions ({}):", sessions.len());
    for s in &sessions {
        println!("{}", render::format_session_line(s));
    }
    Ok(())
}

async fn delete_one(store: &StoreHandle, id: i64, yes: bool) -> anyhow::Result<()> {
    let found = store.get_session(id).await?.map(ChatSession::from);

    let Some(session) = found else {
        anyhow::bail!("No session with id {id}");
    };

    println!("{}", render::format_session_line(&session));
    let confirmed = yes
        || inquire::Confirm::new(&format!("Delete session #{id}?"))
            .with_default(false)
            .prompt()
            .unwrap_or(false);

    if !confirmed {
        println!("  Kept.");
        return Ok(());
    }

    store.delete_session(id).await?;
    println!("  Deleted session #{id}.");
    Ok(())
}

pub async fn run_stats(store: &StoreHandle) -> anyhow::Result<()> {
    let total = store.count_sessions().await?;
    let average = store.average_score().await?;
    let stats = SessionStats {
        total: total.max(0) as usize,
        average_score: average as f32,
    };
    println!("{}", render::format_stats(&stats));
    Ok(())
}

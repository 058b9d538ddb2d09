//! Persisting trained agents through the application container

use std::sync::Arc;

use tempfile::TempDir;
use tictactoe_q::{
    QLearningAgent, QTable,
    adapters::{InMemoryRepository, MsgPackRepository},
    app::{AgentConfig, App},
    ports::AgentRepository,
    q_learning::{SavedAgent, TrainingMetadata},
    session::{GameState, MoveRequest, PlaySession},
    training::{Role, TrainingConfig, train_first_mover},
};

fn trained(app: &App) -> (QLearningAgent, TrainingMetadata) {
    let mut agent = app
        .create_agent(AgentConfig::new().with_epsilon(0.2))
        .unwrap();
    let config = TrainingConfig {
        report_every: 0,
        ..TrainingConfig::with_episodes(300)
    }
    .with_seed(9);
    let report = train_first_mover(&mut agent, config).unwrap();
    (agent, report.metadata())
}

#[test]
fn test_msgpack_file_roundtrip_preserves_every_lookup() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("first_mover.msgpack");

    let app = App::for_testing()
        .with_repository(MsgPackRepository::new())
        .with_default_seed(1)
        .build();
    let (agent, metadata) = trained(&app);
    app.save_agent(&agent, metadata.clone(), &path).unwrap();
    assert!(path.exists());

    let loaded = app.load_agent(&path).unwrap();
    assert_eq!(loaded.q_table().len(), agent.q_table().len());
    for entry in agent.q_table().entries() {
        assert_eq!(loaded.get_value(&entry.state, entry.action), entry.value);
    }
    assert_eq!(loaded.epsilon(), 0.2);

    let saved = MsgPackRepository::new().load(&path).unwrap();
    assert_eq!(saved.metadata, metadata);
    assert_eq!(saved.metadata.role, Some(Role::First));
    assert_eq!(saved.version, SavedAgent::VERSION);
}

#[test]
fn test_in_memory_repository_behaves_like_files() {
    let repo = InMemoryRepository::new();
    let app = App::for_testing()
        .with_repository(repo.clone())
        .with_default_seed(2)
        .build();
    let (agent, metadata) = trained(&app);

    app.save_agent(&agent, metadata, std::path::Path::new("first"))
        .unwrap();
    assert_eq!(repo.count(), 1);

    let table = app.load_table(std::path::Path::new("first")).unwrap();
    assert_eq!(&table, agent.q_table());
}

#[test]
fn test_loaded_tables_serve_concurrent_sessions() {
    let app = App::for_testing()
        .with_repository(InMemoryRepository::new())
        .with_default_seed(3)
        .build();
    let (agent, _) = trained(&app);
    let first = agent.share_table();
    let second = Arc::new(QTable::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut session =
                PlaySession::new(Arc::clone(&first), Arc::clone(&second)).with_seed(i);
            std::thread::spawn(move || {
                let opening = session.opening_move().unwrap();
                let free = opening
                    .board
                    .iter()
                    .flatten()
                    .position(|mark| mark.is_empty())
                    .unwrap();
                session
                    .make_move(MoveRequest {
                        state: opening,
                        x: (free / 3) as i64,
                        y: (free % 3) as i64,
                    })
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        let state: GameState = handle.join().unwrap();
        assert_eq!(state.message, "");
        let marks = state.board.iter().flatten().filter(|m| !m.is_empty()).count();
        assert_eq!(marks, 3);
    }

    // Sessions never write to the shared table.
    assert_eq!(first.as_ref(), agent.q_table());
}

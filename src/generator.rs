use std::fs;
use std::path::{Path, PathBuf};

use crate::api::automods::{ApiError, AutomodsApi};
use crate::sound::{Cue, FeedbackEmitter};
use crate::structs::request::ModpackRequest;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Generating,
}

/// How a single submit attempt settled.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Archive saved to this path
    Saved(PathBuf),
    /// The service rejected the request or was unreachable
    Failed(ApiError),
    /// A request was already in flight, nothing was sent
    Rejected,
}

/// Drives one generation session: holds the option sets fetched at startup,
/// the idle/generating state, and the feedback emitter for cue playback.
///
/// Only one request can be in flight at a time. A submit while generating is
/// ignored rather than queued, and every settlement returns the session to
/// idle so the user can retry immediately.
pub struct GeneratorSession {
    api: AutomodsApi,
    feedback: FeedbackEmitter,
    state: SessionState,
    game_versions: Vec<String>,
    loaders: Vec<String>,
}

impl GeneratorSession {
    pub fn new(api: AutomodsApi, feedback: FeedbackEmitter) -> Self {
        GeneratorSession {
            api,
            feedback,
            state: SessionState::Idle,
            game_versions: Vec::new(),
            loaders: Vec::new(),
        }
    }

    /// Fetches both option sets once. A failed fetch leaves that set empty
    /// and the session not ready, there is no retry.
    pub async fn initialize(&mut self) {
        match self.api.game_versions().await {
            Ok(versions) => self.game_versions = versions,
            Err(err) => log::warn!("could not fetch game versions: {err}"),
        }

        match self.api.loader_versions().await {
            Ok(loaders) => self.loaders = loaders,
            Err(err) => log::warn!("could not fetch loaders: {err}"),
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.game_versions.is_empty() && !self.loaders.is_empty()
    }

    pub fn game_versions(&self) -> &[String] {
        &self.game_versions
    }

    pub fn loaders(&self) -> &[String] {
        &self.loaders
    }

    pub fn feedback(&self) -> &FeedbackEmitter {
        &self.feedback
    }

    /// Sends one generation request and saves the returned archive into
    /// `output_dir` under the `minecraft_<version>_<loader>_modpack.zip`
    /// name. Service and transport failures settle as [`SubmitOutcome::Failed`]
    /// with a failure cue, only local IO problems bubble up as errors.
    pub async fn submit(&mut self, request: &ModpackRequest, output_dir: &Path) -> Result<SubmitOutcome> {
        if self.state == SessionState::Generating {
            return Ok(SubmitOutcome::Rejected);
        }

        self.feedback.play(Cue::Click);
        self.state = SessionState::Generating;

        let result = self.api.generate_modpack(request).await;

        // every settlement re-arms the session, failed attempts included
        self.state = SessionState::Idle;

        match result {
            Ok(archive) => {
                let path = output_dir.join(request.archive_name());
                fs::write(&path, archive)?;
                self.feedback.play(Cue::Success);
                Ok(SubmitOutcome::Saved(path))
            }
            Err(err) => {
                log::warn!("modpack generation failed: {err}");
                self.feedback.play(Cue::Failure);
                Ok(SubmitOutcome::Failed(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::http::{header, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn session_for(base_url: &str) -> GeneratorSession {
        // detached emitter records cues without touching an audio device
        GeneratorSession::new(AutomodsApi::with_base_url(base_url), FeedbackEmitter::detached(false))
    }

    fn option_routes() -> Router {
        Router::new()
            .route("/game-versions", get(|| async { Json(json!(["1.20.1", "1.21"])) }))
            .route("/loader-versions", get(|| async { Json(json!(["fabric", "forge"])) }))
    }

    #[tokio::test]
    async fn initialize_holds_option_sets_in_server_order() {
        let base = spawn_server(option_routes()).await;
        let mut session = session_for(&base);

        session.initialize().await;

        assert_eq!(session.game_versions(), ["1.20.1", "1.21"]);
        assert_eq!(session.loaders(), ["fabric", "forge"]);
        assert!(session.is_ready());
    }

    #[tokio::test]
    async fn initialize_fetch_failure_leaves_session_not_ready() {
        let base = spawn_server(Router::new()).await;
        let mut session = session_for(&base);

        session.initialize().await;

        assert!(session.game_versions().is_empty());
        assert!(session.loaders().is_empty());
        assert!(!session.is_ready());
    }

    #[tokio::test]
    async fn submit_posts_once_and_saves_the_archive() {
        let bodies: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
        let captured = bodies.clone();

        let router = Router::new().route(
            "/generate_modpack",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(body);
                    ([(header::CONTENT_TYPE, "application/zip")], b"PK\x03\x04archive".to_vec())
                }
            }),
        );

        let base = spawn_server(router).await;
        let mut session = session_for(&base);
        let output = tempfile::tempdir().unwrap();

        let request = ModpackRequest::new("1.21".into(), "fabric".into(), "desert survival".into());
        let outcome = session.submit(&request, output.path()).await.unwrap();

        let path = match outcome {
            SubmitOutcome::Saved(path) => path,
            other => panic!("expected Saved, got {other:?}"),
        };
        assert_eq!(path.file_name().unwrap(), "minecraft_1.21_fabric_modpack.zip");
        assert_eq!(fs::read(&path).unwrap(), b"PK\x03\x04archive");

        let bodies = bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(
            bodies[0],
            json!({
                "game_version": "1.21",
                "loader": "fabric",
                "theme": "desert survival"
            })
        );

        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(session.feedback().recorded_cues(), [Cue::Click, Cue::Success]);
    }

    #[tokio::test]
    async fn rejected_response_settles_idle_without_an_archive() {
        let router = Router::new().route(
            "/generate_modpack",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );

        let base = spawn_server(router).await;
        let mut session = session_for(&base);
        let output = tempfile::tempdir().unwrap();

        let request = ModpackRequest::new("1.21".into(), "fabric".into(), "desert survival".into());
        let outcome = session.submit(&request, output.path()).await.unwrap();

        match outcome {
            SubmitOutcome::Failed(ApiError::Status(status)) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("expected Failed with a status, got {other:?}"),
        }

        assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(session.feedback().recorded_cues(), [Cue::Click, Cue::Failure]);

        // settlement re-armed the trigger, a retry goes out again
        let retry = session.submit(&request, output.path()).await.unwrap();
        assert!(matches!(retry, SubmitOutcome::Failed(_)));
        assert_eq!(
            session.feedback().recorded_cues(),
            [Cue::Click, Cue::Failure, Cue::Click, Cue::Failure]
        );
    }

    #[tokio::test]
    async fn transport_failure_settles_idle() {
        // nothing listens on port 1
        let mut session = session_for("http://127.0.0.1:1");
        let output = tempfile::tempdir().unwrap();

        let request = ModpackRequest::new("1.21".into(), "fabric".into(), "tech".into());
        let outcome = session.submit(&request, output.path()).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Failed(ApiError::Transport(_))));
        assert_eq!(session.state, SessionState::Idle);
        assert_eq!(session.feedback().recorded_cues(), [Cue::Click, Cue::Failure]);
    }

    #[tokio::test]
    async fn submit_while_generating_is_ignored() {
        let posts = Arc::new(Mutex::new(0u32));
        let counter = posts.clone();

        let router = Router::new().route(
            "/generate_modpack",
            post(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Vec::<u8>::new()
                }
            }),
        );

        let base = spawn_server(router).await;
        let mut session = session_for(&base);
        let output = tempfile::tempdir().unwrap();

        session.state = SessionState::Generating;

        let request = ModpackRequest::new("1.21".into(), "fabric".into(), "tech".into());
        let outcome = session.submit(&request, output.path()).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Rejected));
        assert_eq!(*posts.lock().unwrap(), 0);
        assert_eq!(session.state, SessionState::Generating);
        // an ignored submit makes no sound at all
        assert!(session.feedback().recorded_cues().is_empty());
    }
}

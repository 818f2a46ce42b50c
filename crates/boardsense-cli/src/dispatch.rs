//! Request dispatch and the documents written back to the caller

use crate::cli::{Cli, Command};
use boardsense_core::{ErrorResponse, InfoResponse, PredictionResult, Result};
use boardsense_models::{BridgeConfig, ModelRegistry, Predictor};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use serde::Serialize;
use tracing::debug;

pub const USAGE: &str = "usage: info | predict <alias> <board_csv>";
pub const PREDICT_USAGE: &str = "usage: predict <alias> <board_csv>";

/// The single JSON document produced by one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Info(InfoResponse),
    Prediction(PredictionResult),
    Error(ErrorResponse),
}

impl Response {
    pub fn error(message: impl ToString) -> Self {
        Response::Error(ErrorResponse::new(message))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Routes parsed commands to the predictor
pub struct Dispatcher {
    predictor: Predictor,
}

impl Dispatcher {
    pub fn new(predictor: Predictor) -> Self {
        Self { predictor }
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(Predictor::new(ModelRegistry::from_config(config)))
    }

    pub fn dispatch(&mut self, command: Option<Command>) -> Response {
        match command {
            None => Response::error(USAGE),
            Some(Command::Info) => Response::Info(self.info()),
            Some(Command::Predict {
                alias: Some(alias),
                board: Some(board),
            }) => {
                debug!("Predict request for '{}'", alias);
                Response::Prediction(self.predictor.predict(&alias, &board))
            }
            Some(Command::Predict { .. }) => Response::error(PREDICT_USAGE),
        }
    }

    fn info(&self) -> InfoResponse {
        InfoResponse {
            available_models: self
                .predictor
                .registry()
                .list_available()
                .into_iter()
                .map(|alias| alias.to_string())
                .collect(),
        }
    }
}

/// Bridge configuration for this invocation
///
/// The config file is optional. `--models-dir` (or its environment
/// variable) takes precedence over the file.
pub fn load_config(cli: &Cli) -> Result<BridgeConfig> {
    let config = BridgeConfig::load_or_default(&cli.config)?;
    Ok(match &cli.models_dir {
        Some(dir) => config.with_models_dir(dir),
        None => config,
    })
}

/// Turn an argument parsing failure into an error document
pub fn usage_response(err: &clap::Error) -> Response {
    if err.kind() == ErrorKind::InvalidSubcommand {
        if let Some(ContextValue::String(name)) = err.get(ContextKind::InvalidSubcommand) {
            return Response::error(format!("unknown command: {}", name));
        }
    }

    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    Response::error(line.strip_prefix("error: ").unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const TREE: &str = r#"{"kind": "estimator", "estimator": {
        "type": "decision_tree", "classes": [0, 1, 2], "n_features": 9,
        "nodes": [
            {"feature": 4, "threshold": 0.5, "left": 1, "right": 2},
            {"value": [3.0, 1.0, 0.0]},
            {"value": [0.0, 0.0, 5.0]}
        ]}}"#;

    fn dispatcher(dir: &std::path::Path) -> Dispatcher {
        Dispatcher::from_config(&BridgeConfig::default().with_models_dir(dir))
    }

    #[test]
    fn test_missing_command() {
        let dir = tempfile::tempdir().unwrap();
        let response = dispatcher(dir.path()).dispatch(None);
        assert_eq!(
            response.to_json().unwrap(),
            r#"{"error":"usage: info | predict <alias> <board_csv>"}"#
        );
    }

    #[test]
    fn test_missing_predict_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let mut dispatcher = dispatcher(dir.path());

        let response = dispatcher.dispatch(Some(Command::Predict {
            alias: Some("knn".to_string()),
            board: None,
        }));
        assert_eq!(response, Response::error(PREDICT_USAGE));

        let response = dispatcher.dispatch(Some(Command::Predict {
            alias: None,
            board: None,
        }));
        assert_eq!(response, Response::error(PREDICT_USAGE));
    }

    #[test]
    fn test_info_and_predict() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("decision_tree.json"), TREE).unwrap();
        let mut dispatcher = dispatcher(dir.path());

        assert_eq!(
            dispatcher.dispatch(Some(Command::Info)).to_json().unwrap(),
            r#"{"available_models":["decision_tree"]}"#
        );

        let response = dispatcher.dispatch(Some(Command::Predict {
            alias: Some("decision_tree".to_string()),
            board: Some("0,0,0,0,1,0,0,0,0".to_string()),
        }));
        assert_eq!(
            response.to_json().unwrap(),
            r#"{"model":"decision_tree","prediction_int":2,"prediction_label":"End of Game","confidence":1.0}"#
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = Cli::try_parse_from(["boardsense", "train"]).unwrap_err();
        assert_eq!(usage_response(&err), Response::error("unknown command: train"));
    }

    #[test]
    fn test_other_parse_errors_keep_first_line() {
        let err = Cli::try_parse_from(["boardsense", "--bogus", "info"]).unwrap_err();
        let Response::Error(ErrorResponse { error }) = usage_response(&err) else {
            panic!("expected an error document");
        };
        assert!(!error.starts_with("error:"));
        assert!(error.contains("--bogus"));
        assert!(!error.contains('\n'));
    }

    #[test]
    fn test_models_dir_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("boardsense.yaml");
        std::fs::write(&config_path, "models_dir: /from/file\n").unwrap();

        let mut cli = Cli::try_parse_from([
            "boardsense",
            "--config",
            config_path.to_str().unwrap(),
            "info",
        ])
        .unwrap();
        // Ignore BOARDSENSE_MODELS_DIR from the test environment.
        cli.models_dir = None;
        assert_eq!(
            load_config(&cli).unwrap().models_dir,
            std::path::PathBuf::from("/from/file")
        );

        let cli = Cli::try_parse_from([
            "boardsense",
            "--config",
            config_path.to_str().unwrap(),
            "--models-dir",
            "/from/flag",
            "info",
        ])
        .unwrap();
        assert_eq!(
            load_config(&cli).unwrap().models_dir,
            std::path::PathBuf::from("/from/flag")
        );
    }
}

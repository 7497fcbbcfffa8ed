//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::lab::Model;

#[derive(Parser, Debug)]
#[command(name = "physics-lab")]
#[command(about = "Interactive physics models: waves, optics, orbits and seasons")]
pub struct Args {
    /// Model to open (slinky-lab, thin-lens-lab, concave-mirror, barycenter-lab, earth-seasons, solar-system)
    #[arg(long, value_name = "ID")]
    pub model: Option<Model>,

    /// JSON configuration file applied at startup
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Window width in logical pixels (overrides the config file)
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Window height in logical pixels (overrides the config file)
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["physics-lab"]).unwrap();
        assert!(args.model.is_none());
        assert!(args.config.is_none());
        assert!(args.width.is_none());
    }

    #[test]
    fn test_model_and_size() {
        let args = Args::try_parse_from([
            "physics-lab",
            "--model",
            "barycenter-lab",
            "--width",
            "1600",
            "--config",
            "lab.json",
        ])
        .unwrap();
        assert_eq!(args.model, Some(Model::BarycenterLab));
        assert_eq!(args.width, Some(1600));
        assert_eq!(args.config, Some(PathBuf::from("lab.json")));
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Args::try_parse_from(["physics-lab", "--model", "quantum-foam"]).is_err());
    }
}

use anyhow::Context;
use bcve::embed::BlockAttributes;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one embed block, printing the placeholder or the input unchanged
    Render {
        /// Block attributes as json, e.g.
        /// '{"providerNameSlug":"youtube","url":"https://youtu.be/dQw4w9WgXcQ"}'
        #[clap(long)]
        attrs: String,

        /// Read the block's inner html from this file instead of stdin
        #[clap(short, long)]
        file: Option<String>,
    },
    /// Print the thumbnail url for a YouTube or Vimeo url
    Thumbnail {
        /// A url
        #[clap(allow_hyphen_values = true)]
        url: String,
    },
    /// Start the http service
    Daemon {
        /// Overrides listen_addr from config.yaml
        #[clap(long)]
        listen: Option<String>,
    },
}

/// Decodes the `--attrs` json of `render`.
pub fn parse_attrs(raw: &str) -> anyhow::Result<BlockAttributes> {
    serde_json::from_str(raw).context("--attrs is not valid block json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcve::embed::Provider;

    #[test]
    fn test_render_args() {
        let args = Args::try_parse_from([
            "bcve",
            "render",
            "--attrs",
            r#"{"providerNameSlug":"youtube","url":"https://youtu.be/dQw4w9WgXcQ"}"#,
            "-f",
            "block.html",
        ])
        .unwrap();

        match args.command {
            Command::Render { attrs, file } => {
                assert_eq!(file.as_deref(), Some("block.html"));
                let attrs = parse_attrs(&attrs).unwrap();
                assert_eq!(attrs.provider(), Provider::YouTube);
                assert_eq!(attrs.url(), Some("https://youtu.be/dQw4w9WgXcQ"));
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Args::try_parse_from(["bcve", "render"]).is_err());
    }

    #[test]
    fn test_thumbnail_accepts_leading_hyphen() {
        let args = Args::try_parse_from(["bcve", "thumbnail", "-https://youtu.be/x"]).unwrap();

        match args.command {
            Command::Thumbnail { url } => assert_eq!(url, "-https://youtu.be/x"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_daemon_listen_override() {
        let args = Args::try_parse_from(["bcve", "daemon", "--listen", "0.0.0.0:9000"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Daemon { listen: Some(ref addr) } if addr == "0.0.0.0:9000"
        ));

        let args = Args::try_parse_from(["bcve", "daemon"]).unwrap();
        assert!(matches!(args.command, Command::Daemon { listen: None }));
    }

    #[test]
    fn test_parse_attrs() {
        let attrs =
            parse_attrs(r#"{"providerNameSlug":"vimeo","url":"https://vimeo.com/1","align":"wide"}"#)
                .unwrap();
        assert_eq!(attrs.provider(), Provider::Vimeo);
        assert_eq!(attrs.align.as_deref(), Some("wide"));

        assert_eq!(parse_attrs("{}").unwrap(), BlockAttributes::default());

        for raw in ["", "not json", r#""youtube""#, r#"{"url": 5}"#] {
            let err = parse_attrs(raw).unwrap_err();
            assert_eq!(err.to_string(), "--attrs is not valid block json", "{raw:?}");
        }
    }
}

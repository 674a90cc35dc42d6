use std::net::SocketAddr;
use std::path::PathBuf;

use url::Url;

#[derive(clap::Parser, Debug)]
#[clap(name = "bestseller", about = "Bestselling books by genre")]
pub struct Cli {
    /// Settings file (TOML or JSON); `BESTSELLER__*` variables override it
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the proxy service
    Serve {
        /// Address to listen on, overriding the settings
        #[clap(long)]
        addr: Option<SocketAddr>,
    },
    /// List genres whose name contains the query
    Genres {
        /// Case-insensitive filter on the genre name
        #[clap(default_value = "")]
        query: String,
        #[clap(flatten)]
        source: SourceArgs,
    },
    /// Show the current bestseller of a genre
    Bestseller {
        /// Genre id, as listed by `genres`
        genre_id: String,
        /// Print the saved block markup instead of a summary
        #[clap(long)]
        html: bool,
        /// Block heading used with --html
        #[clap(long, default_value = bestseller_block::DEFAULT_TITLE)]
        title: String,
        #[clap(flatten)]
        source: SourceArgs,
    },
    /// Render the saved markup of a stored attributes document
    Render {
        /// JSON attributes file
        path: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
pub struct SourceArgs {
    /// Query a running proxy at this site URL instead of the catalog directly
    #[clap(long)]
    pub proxy: Option<Url>,
}

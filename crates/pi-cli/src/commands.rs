use pi_core::PlayerId;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Establish the device identity and print it
    Bootstrap,

    /// Show the locally stored identity without contacting the directory
    Status,

    /// Bootstrap, then fetch the profile again regardless of freshness
    Refetch,

    /// Bootstrap, then switch this session to another player (not persisted)
    Override {
        /// Player id to use for the session
        id: PlayerId,
    },

    /// Bootstrap and keep the profile fresh, printing every change until Ctrl-C
    Watch,
}

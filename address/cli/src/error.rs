/// Failures specific to the command line front-end.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("public key is not valid hex: {0}")]
    InvalidPublicKeyHex(#[from] hex::FromHexError),

    #[error("public key must be 32 bytes, got {0} bytes")]
    InvalidPublicKeyLength(usize),

    #[error(transparent)]
    Address(#[from] xelis_address::Error),
}

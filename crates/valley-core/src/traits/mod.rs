mod remote_sync;

pub use remote_sync::IRemoteSyncClient;

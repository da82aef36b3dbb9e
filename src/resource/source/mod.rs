use std::future::Future;

use anyhow::Result;

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod http;

/// A one-shot fetch of a DDS file.
pub trait DdsSource {
    fn describe(&self) -> &str;
    fn load(&self) -> impl Future<Output = Result<Vec<u8>>>;
}

pub type PendingDds = crossbeam_channel::Receiver<Result<Vec<u8>>>;

/// Starts loading `source` off the frame loop. The result arrives on the
/// returned channel exactly once.
pub fn fetch_in_background<S: DdsSource + Send + 'static>(source: S) -> PendingDds {
    let (sender, receiver) = crossbeam_channel::bounded(1);

    log::info!("Fetching DDS file: {}", source.describe());

    cfg_if::cfg_if! {
        if #[cfg(target_arch="wasm32")] {
            wasm_bindgen_futures::spawn_local(deliver(source, sender));
        } else {
            std::thread::spawn(move || pollster::block_on(deliver(source, sender)));
        }
    }

    receiver
}

async fn deliver<S: DdsSource>(source: S, sender: crossbeam_channel::Sender<Result<Vec<u8>>>) {
    let result = source.load().await;
    if sender.send(result).is_err() {
        log::warn!("DDS fetch completed after its receiver was dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticDdsSource(Vec<u8>);

    impl DdsSource for StaticDdsSource {
        fn describe(&self) -> &str {
            "static"
        }

        async fn load(&self) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn delivers_fetched_bytes_once() -> Result<()> {
        let pending = fetch_in_background(StaticDdsSource(vec![1, 2, 3]));

        let bytes = pending.recv_timeout(std::time::Duration::from_secs(5))??;
        assert_eq!(bytes, vec![1, 2, 3]);
        assert!(pending.recv().is_err());

        Ok(())
    }
}

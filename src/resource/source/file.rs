use anyhow::Result;

use crate::resource::source::DdsSource;

pub struct FileSystemDdsSource {
    pub path: String,
}

impl DdsSource for FileSystemDdsSource {
    fn describe(&self) -> &str {
        &self.path
    }

    async fn load(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_file_contents() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"DDS payload")?;

        let source = FileSystemDdsSource {
            path: file.path().to_string_lossy().into_owned(),
        };

        assert_eq!(pollster::block_on(source.load())?, b"DDS payload".to_vec());

        Ok(())
    }

    #[test]
    fn reports_missing_file() -> Result<()> {
        let directory = tempfile::tempdir()?;
        let source = FileSystemDdsSource {
            path: directory
                .path()
                .join("missing.dds")
                .to_string_lossy()
                .into_owned(),
        };

        let error = pollster::block_on(source.load()).unwrap_err();
        assert!(error.downcast_ref::<std::io::Error>().is_some());

        Ok(())
    }
}

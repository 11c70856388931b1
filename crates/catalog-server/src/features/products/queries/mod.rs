pub mod download_sample;
pub mod list;

pub use download_sample::{DownloadSampleError, SampleExport, SAMPLE_FILE_NAME};

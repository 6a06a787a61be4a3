//! Local disk sample collection

use std::path::Path;
use tracing::debug;

use crate::models::{AgentError, AgentResult, DiskMetrics};

/// One line of a mounts table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub device: String,
    pub mountpoint: String,
    pub fs_type: String,
}

/// Parse a mounts table in `/proc/mounts` format
///
/// Lines with fewer than three fields are skipped. Octal escapes the kernel
/// uses for whitespace in paths are decoded.
pub fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mountpoint = fields.next()?;
            let fs_type = fields.next()?;

            Some(MountEntry {
                device: unescape_octal(device),
                mountpoint: unescape_octal(mountpoint),
                fs_type: fs_type.to_string(),
            })
        })
        .collect()
}

/// Decode `\NNN` octal escapes (`\040` space, `\011` tab, `\134` backslash)
fn unescape_octal(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && is_octal_escape(&bytes[i + 1..i + 4]) {
            let value = (bytes[i + 1] - b'0') * 64 + (bytes[i + 2] - b'0') * 8 + (bytes[i + 3] - b'0');
            out.push(value);
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn is_octal_escape(digits: &[u8]) -> bool {
    digits.len() == 3
        && (b'0'..=b'3').contains(&digits[0])
        && digits[1..].iter().all(|d| (b'0'..=b'7').contains(d))
}

/// Read and parse a mounts table from disk
pub fn read_mounts(path: &Path) -> AgentResult<Vec<MountEntry>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AgentError::collection(path.display().to_string(), e.to_string()))?;
    Ok(parse_mounts(&content))
}

/// Query capacity figures for one mount
#[cfg(unix)]
pub fn statvfs_metrics(entry: &MountEntry) -> std::io::Result<DiskMetrics> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;

    let path_cstr = CString::new(entry.mountpoint.as_bytes())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();

    let result = unsafe { libc::statvfs(path_cstr.as_ptr(), stat.as_mut_ptr()) };

    if result != 0 {
        return Err(std::io::Error::last_os_error());
    }

    let stat = unsafe { stat.assume_init() };

    let block_size = stat.f_frsize as u64;
    let total = (stat.f_blocks as u64).saturating_mul(block_size);
    let available = (stat.f_bavail as u64).saturating_mul(block_size);
    let used = total.saturating_sub(available);

    Ok(DiskMetrics::new(
        entry.device.clone(),
        entry.mountpoint.clone(),
        entry.fs_type.clone(),
        total,
        used,
    ))
}

/// Fallback for non-Unix systems
#[cfg(not(unix))]
pub fn statvfs_metrics(_entry: &MountEntry) -> std::io::Result<DiskMetrics> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "statvfs is only available on Unix",
    ))
}

/// Collect a sample for every mount in the table that can be queried
///
/// Samples are unfiltered; pseudo filesystems are dropped later during
/// aggregation.
pub fn collect_disk_metrics(mounts_path: &Path) -> AgentResult<Vec<DiskMetrics>> {
    let mounts = read_mounts(mounts_path)?;
    let mut out = Vec::with_capacity(mounts.len());

    for entry in &mounts {
        match statvfs_metrics(entry) {
            Ok(disk) => out.push(disk),
            Err(e) => debug!("Skipping {} ({}): {}", entry.mountpoint, entry.fs_type, e),
        }
    }

    debug!("Collected {} of {} mounts", out.len(), mounts.len());
    Ok(out)
}

/// Host name of this machine
#[cfg(unix)]
pub fn local_hostname() -> Option<String> {
    nix::unistd::gethostname()
        .ok()?
        .into_string()
        .ok()
        .filter(|name| !name.is_empty())
}

#[cfg(not(unix))]
pub fn local_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok()
}

//! Filesystem inclusion filter
//!
//! Decides which samples carry a meaningful capacity signal. The filter is a
//! blocklist: any filesystem type not listed below is counted, including
//! types this crate has never heard of.

use crate::models::DiskMetrics;

/// Kernel-virtual and non-persistent filesystem types
pub const PSEUDO_FILESYSTEMS: &[&str] = &[
    "tmpfs", "proc", "sysfs", "devtmpfs", "squashfs", "overlay", "devfs",
    "cgroup", "cgroup2", "devpts", "mqueue", "pstore", "securityfs",
    "debugfs", "tracefs", "configfs", "fusectl", "hugetlbfs", "bpf",
    "binfmt_misc", "autofs", "efivarfs", "nsfs", "rpc_pipefs", "ramfs",
];

/// Mountpoint prefixes that only produce noise (container layers, snaps,
/// kernel trees)
pub const EXCLUDED_MOUNT_PREFIXES: &[&str] = &[
    "/var/lib/docker/",
    "/snap/",
    "/proc/",
    "/sys/",
    "/dev/",
];

/// Whether a sample should contribute to the disk usage summary
pub fn should_include(disk: &DiskMetrics) -> bool {
    if PSEUDO_FILESYSTEMS.contains(&disk.filesystem.as_str()) {
        return false;
    }

    !EXCLUDED_MOUNT_PREFIXES
        .iter()
        .any(|prefix| disk.mountpoint.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk(fs_type: &str, mount: &str) -> DiskMetrics {
        DiskMetrics::new("/dev/sda1", mount, fs_type, 1_000, 100)
    }

    #[test]
    fn test_real_filesystems_included() {
        for fs_type in ["ext4", "xfs", "btrfs", "nfs", "nfs4", "zfs"] {
            assert!(should_include(&disk(fs_type, "/")), "{} should be included", fs_type);
        }
    }

    #[test]
    fn test_pseudo_filesystems_excluded() {
        for fs_type in ["tmpfs", "proc", "sysfs", "devtmpfs", "squashfs", "overlay", "devfs", "cgroup", "cgroup2"] {
            assert!(!should_include(&disk(fs_type, "/mnt/x")), "{} should be excluded", fs_type);
        }
    }

    #[test]
    fn test_type_match_is_case_sensitive() {
        assert!(should_include(&disk("TMPFS", "/mnt/x")));
    }

    #[test]
    fn test_unknown_filesystem_included() {
        assert!(should_include(&disk("someweirdfs", "/mnt/data")));
    }

    #[test]
    fn test_noise_mount_prefixes_excluded() {
        assert!(!should_include(&disk("ext4", "/var/lib/docker/overlay2/abc")));
        assert!(!should_include(&disk("ext4", "/snap/core/123")));
        assert!(!should_include(&disk("ext4", "/proc/fs")));
        assert!(!should_include(&disk("ext4", "/sys/fs/cgroup")));
        assert!(!should_include(&disk("ext4", "/dev/shm")));
    }

    #[test]
    fn test_prefix_not_substring() {
        assert!(should_include(&disk("ext4", "/data/snap/backup")));
        assert!(should_include(&disk("ext4", "/var/lib/docker")));
        assert!(should_include(&disk("ext4", "/devices")));
    }
}

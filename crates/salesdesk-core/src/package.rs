//! # Package Bucketing
//!
//! Report columns need the package of a row, but stored labels are free text
//! (older entries say "Gold", newer ones "Gold (3 bottles)"). Bucketing is a
//! case-insensitive substring match rather than the exact lookup used for
//! pricing.

use serde::{Deserialize, Serialize};

/// Report bucket for a package label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageBucket {
    Platinum,
    Gold,
    Silver,
    Retail,
    Blister,
    Unknown,
}

impl PackageBucket {
    /// Platinum, Gold and Silver are package rows; the rest count as retail
    /// items on the inventory report.
    pub const fn is_package(&self) -> bool {
        matches!(
            self,
            PackageBucket::Platinum | PackageBucket::Gold | PackageBucket::Silver
        )
    }

    pub const fn label(&self) -> &'static str {
        match self {
            PackageBucket::Platinum => "Platinum",
            PackageBucket::Gold => "Gold",
            PackageBucket::Silver => "Silver",
            PackageBucket::Retail => "Retail",
            PackageBucket::Blister => "Blister",
            PackageBucket::Unknown => "Unknown",
        }
    }
}

/// Buckets a stored package label.
///
/// ## Example
/// ```rust
/// use salesdesk_core::package::{bucket_package, PackageBucket};
///
/// assert_eq!(bucket_package(Some("Platinum (10 bottles)")), PackageBucket::Platinum);
/// assert_eq!(bucket_package(Some("PLAT")), PackageBucket::Platinum);
/// assert_eq!(bucket_package(None), PackageBucket::Unknown);
/// ```
pub fn bucket_package(label: Option<&str>) -> PackageBucket {
    let label = label.unwrap_or_default().to_lowercase();

    if label.contains("plat") {
        PackageBucket::Platinum
    } else if label.contains("gold") {
        PackageBucket::Gold
    } else if label.contains("silver") {
        PackageBucket::Silver
    } else if label.contains("blister") {
        PackageBucket::Blister
    } else if label.contains("retail") {
        PackageBucket::Retail
    } else {
        PackageBucket::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PackageType;

    #[test]
    fn test_catalogue_labels_bucket_to_themselves() {
        let expected = [
            PackageBucket::Silver,
            PackageBucket::Gold,
            PackageBucket::Platinum,
            PackageBucket::Retail,
            PackageBucket::Blister,
        ];
        for (package, bucket) in PackageType::ALL.iter().zip(expected) {
            assert_eq!(bucket_package(Some(package.label())), bucket);
        }
    }

    #[test]
    fn test_package_rows() {
        assert!(bucket_package(Some("gold")).is_package());
        assert!(!bucket_package(Some("Retail (1 bottle)")).is_package());
        assert!(!bucket_package(Some("")).is_package());
    }
}

//! Segmentation label to organ name mapping.

/// The organ name for a segmentation label, following the fixed abdominal
/// atlas numbering used by the upstream segmentation step.
///
/// Label 12 is unassigned in the atlas.
#[must_use]
pub const fn organ_name(label: i64) -> Option<&'static str> {
    match label {
        1 => Some("liver"),
        2 => Some("spleen"),
        3 => Some("kidney_left"),
        4 => Some("kidney_right"),
        5 => Some("stomach"),
        6 => Some("gallbladder"),
        7 => Some("pancreas"),
        8 => Some("aorta"),
        9 => Some("inferior_vena_cava"),
        10 => Some("portal_vein"),
        11 => Some("hepatic_veins"),
        13 => Some("esophagus"),
        14 => Some("small_bowel"),
        15 => Some("duodenum"),
        16 => Some("colon"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_resolve() {
        assert_eq!(organ_name(1), Some("liver"));
        assert_eq!(organ_name(3), Some("kidney_left"));
        assert_eq!(organ_name(7), Some("pancreas"));
        assert_eq!(organ_name(13), Some("esophagus"));
        assert_eq!(organ_name(16), Some("colon"));
    }

    #[test]
    fn unassigned_labels_are_none() {
        assert_eq!(organ_name(0), None);
        assert_eq!(organ_name(12), None);
        assert_eq!(organ_name(17), None);
        assert_eq!(organ_name(-3), None);
    }
}

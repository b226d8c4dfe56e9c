//! Value application.
//!
//! Pushes slider values into every mesh slot bound to a shape key. Writes are
//! plain last-writer-wins assignments; nothing is clamped. Non-finite values
//! are dropped so every stored influence stays exportable.

use crate::grouping::GroupedShapeKey;
use crate::mesh::{MeshArena, ShapeKeyEntry};
use crate::registry::ShapeKeyRegistry;

/// Writes `value` to every entry of `name`.
///
/// Unknown names write nothing.
pub fn apply_single(registry: &ShapeKeyRegistry, arena: &mut MeshArena, name: &str, value: f64) {
    let entries = registry.get_entries(name);
    if entries.is_empty() {
        tracing::debug!(shape_key = name, "ignoring value for unregistered shape key");
        return;
    }
    write_all(arena, name, entries, value);
}

/// Drives an Up/Down pair from one signed slider value.
///
/// Positive values go to the up key and zero the down key, negative values
/// go (as magnitude) to the down key and zero the up key, zero clears both.
pub fn apply_combined(
    registry: &ShapeKeyRegistry,
    arena: &mut MeshArena,
    up_key: &str,
    down_key: &str,
    value: f64,
) {
    if !value.is_finite() {
        tracing::warn!(up_key, down_key, value, "ignoring non-finite slider value");
        return;
    }
    let (up, down) = if value > 0.0 {
        (value, 0.0)
    } else if value < 0.0 {
        (0.0, value.abs())
    } else {
        (0.0, 0.0)
    };
    write_all(arena, up_key, registry.get_entries(up_key), up);
    write_all(arena, down_key, registry.get_entries(down_key), down);
}

/// Applies a slider value to a grouped slider, dispatching on its kind.
pub fn apply_group(
    registry: &ShapeKeyRegistry,
    arena: &mut MeshArena,
    group: &GroupedShapeKey,
    value: f64,
) {
    match group {
        GroupedShapeKey::Single { key, .. } => apply_single(registry, arena, key, value),
        GroupedShapeKey::Combined {
            up_key, down_key, ..
        } => apply_combined(registry, arena, up_key, down_key, value),
    }
}

/// Zeroes every registered entry. The registry itself is untouched.
pub fn reset_all(registry: &ShapeKeyRegistry, arena: &mut MeshArena) {
    for (name, entries) in registry.iter() {
        write_all(arena, name, entries, 0.0);
    }
}

/// Reads the live value of `name` from its first entry.
pub fn current_value(registry: &ShapeKeyRegistry, arena: &MeshArena, name: &str) -> Option<f64> {
    registry
        .get_entries(name)
        .first()
        .and_then(|entry| arena.influence(*entry))
}

/// Reconstructs the signed slider position of an Up/Down pair.
pub fn combined_value(
    registry: &ShapeKeyRegistry,
    arena: &MeshArena,
    up_key: &str,
    down_key: &str,
) -> f64 {
    let up = current_value(registry, arena, up_key).unwrap_or(0.0);
    let down = current_value(registry, arena, down_key).unwrap_or(0.0);
    up - down
}

fn write_all(arena: &mut MeshArena, name: &str, entries: &[ShapeKeyEntry], value: f64) {
    if !value.is_finite() {
        tracing::warn!(shape_key = name, value, "ignoring non-finite shape-key value");
        return;
    }
    for entry in entries {
        if !arena.set_influence(*entry, value) {
            tracing::warn!(
                shape_key = name,
                mesh = %entry.mesh,
                index = entry.index,
                "skipping write to missing influence slot"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshId;

    struct Fixture {
        arena: MeshArena,
        registry: ShapeKeyRegistry,
        mesh_a: MeshId,
        mesh_b: MeshId,
    }

    fn fixture() -> Fixture {
        let mut arena = MeshArena::new();
        let mesh_a = arena.insert("body", "meshA", 4);
        let mesh_b = arena.insert("dress", "meshB", 2);
        let mut registry = ShapeKeyRegistry::new();
        registry.register([
            ("waistUp", vec![ShapeKeyEntry::new(mesh_a, 2)]),
            ("waistDown", vec![ShapeKeyEntry::new(mesh_a, 3)]),
            ("neck", vec![ShapeKeyEntry::new(mesh_a, 0)]),
        ]);
        registry.register([
            ("waistUp", vec![ShapeKeyEntry::new(mesh_b, 0)]),
            ("waistDown", vec![ShapeKeyEntry::new(mesh_b, 1)]),
        ]);
        Fixture {
            arena,
            registry,
            mesh_a,
            mesh_b,
        }
    }

    #[test]
    fn test_apply_single_writes_every_entry() {
        let mut f = fixture();
        apply_single(&f.registry, &mut f.arena, "waistUp", 0.3);
        assert_eq!(f.arena.influences(f.mesh_a)[2], 0.3);
        assert_eq!(f.arena.influences(f.mesh_b)[0], 0.3);
    }

    #[test]
    fn test_apply_single_does_not_clamp() {
        let mut f = fixture();
        apply_single(&f.registry, &mut f.arena, "neck", 1.7);
        assert_eq!(f.arena.influences(f.mesh_a)[0], 1.7);
    }

    #[test]
    fn test_apply_single_unknown_name_is_noop() {
        let mut f = fixture();
        let before = f.arena.clone();
        apply_single(&f.registry, &mut f.arena, "notLoadedYet", 0.9);
        assert_eq!(f.arena.influences(f.mesh_a), before.influences(f.mesh_a));
        assert_eq!(f.arena.influences(f.mesh_b), before.influences(f.mesh_b));
    }

    #[test]
    fn test_apply_combined_scenario() {
        let mut f = fixture();

        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", 0.6);
        assert_eq!(f.arena.influences(f.mesh_a)[2], 0.6);
        assert_eq!(f.arena.influences(f.mesh_a)[3], 0.0);

        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", -0.25);
        assert_eq!(f.arena.influences(f.mesh_a)[2], 0.0);
        assert_eq!(f.arena.influences(f.mesh_a)[3], 0.25);
        assert_eq!(f.arena.influences(f.mesh_b), &[0.0, 0.25]);
    }

    #[test]
    fn test_apply_combined_zero_clears_both() {
        let mut f = fixture();
        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", 0.8);
        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", 0.0);
        assert_eq!(f.arena.influences(f.mesh_a)[2..], [0.0, 0.0]);
        assert_eq!(f.arena.influences(f.mesh_b), &[0.0, 0.0]);
    }

    #[test]
    fn test_reset_all() {
        let mut f = fixture();
        apply_single(&f.registry, &mut f.arena, "neck", 0.5);
        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", -1.0);

        reset_all(&f.registry, &mut f.arena);

        for (_, mesh) in f.arena.iter() {
            assert!(mesh.influences.iter().all(|v| *v == 0.0));
        }
        assert_eq!(f.registry.len(), 3);
    }

    #[test]
    fn test_combined_value_reconstructs_sign() {
        let mut f = fixture();
        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", -0.4);
        assert_eq!(
            combined_value(&f.registry, &f.arena, "waistUp", "waistDown"),
            -0.4
        );
        assert_eq!(current_value(&f.registry, &f.arena, "missing"), None);
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        let mut f = fixture();
        apply_single(&f.registry, &mut f.arena, "neck", 0.3);
        apply_single(&f.registry, &mut f.arena, "neck", f64::INFINITY);
        apply_single(&f.registry, &mut f.arena, "neck", f64::NAN);
        assert_eq!(current_value(&f.registry, &f.arena, "neck"), Some(0.3));

        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", 0.5);
        apply_combined(&f.registry, &mut f.arena, "waistUp", "waistDown", f64::NEG_INFINITY);
        assert_eq!(f.arena.influences(f.mesh_a)[2..].to_vec(), vec![0.5, 0.0]);
        assert!(f.arena.iter().all(|(_, m)| m.influences.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn test_out_of_range_values_are_not_clamped() {
        let mut f = fixture();
        apply_single(&f.registry, &mut f.arena, "neck", 2.5);
        assert_eq!(current_value(&f.registry, &f.arena, "neck"), Some(2.5));
    }
}

//! Catálogo de rutas y puntos de control
//!
//! Resolución y orden de puntos como funciones puras sobre un snapshot del
//! catálogo. Los repositorios las reutilizan o las replican en SQL.

use crate::models::Checkpoint;

/// Resuelve el identificador escaneado (id numérico o nombre visible).
///
/// La igualdad por id tiene prioridad sobre el nombre. Ante varios puntos
/// con el mismo nombre gana el de menor id.
pub fn resolve_checkpoint<'a>(checkpoints: &'a [Checkpoint], identifier: &str) -> Option<&'a Checkpoint> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return None;
    }

    if let Ok(id) = identifier.parse::<i64>() {
        if let Some(found) = checkpoints.iter().find(|c| c.id == id) {
            return Some(found);
        }
    }

    checkpoints
        .iter()
        .filter(|c| c.name == identifier)
        .min_by_key(|c| c.id)
}

/// Ordena los puntos de una ruta por (sequence_index, id)
pub fn order_checkpoints(mut checkpoints: Vec<Checkpoint>) -> Vec<Checkpoint> {
    checkpoints.sort_by_key(Checkpoint::order_key);
    checkpoints
}

/// Punto inmediatamente anterior en el orden de la ruta.
///
/// `None` si el punto es el primero o no pertenece a la secuencia.
pub fn predecessor<'a>(ordered: &'a [Checkpoint], checkpoint_id: i64) -> Option<&'a Checkpoint> {
    let position = ordered.iter().position(|c| c.id == checkpoint_id)?;
    position.checked_sub(1).map(|previous| &ordered[previous])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(id: i64, name: &str, sequence_index: i32) -> Checkpoint {
        Checkpoint {
            id,
            route_id: 1,
            name: name.to_string(),
            sequence_index,
            latitude: None,
            longitude: None,
            radius_m: None,
        }
    }

    #[test]
    fn test_resolve_by_id_or_name() {
        let catalog = vec![checkpoint(10, "P1", 0), checkpoint(11, "P2", 0)];
        assert_eq!(resolve_checkpoint(&catalog, "10").map(|c| c.id), Some(10));
        assert_eq!(resolve_checkpoint(&catalog, "P1").map(|c| c.id), Some(10));
        assert_eq!(resolve_checkpoint(&catalog, " P2 ").map(|c| c.id), Some(11));
        assert!(resolve_checkpoint(&catalog, "P9").is_none());
        assert!(resolve_checkpoint(&catalog, "").is_none());
    }

    #[test]
    fn test_id_match_wins_over_numeric_name() {
        let catalog = vec![checkpoint(10, "11", 0), checkpoint(11, "Portón", 0)];
        assert_eq!(resolve_checkpoint(&catalog, "11").map(|c| c.id), Some(11));
    }

    #[test]
    fn test_numeric_name_used_when_no_id_matches() {
        let catalog = vec![checkpoint(10, "500", 0)];
        assert_eq!(resolve_checkpoint(&catalog, "500").map(|c| c.id), Some(10));
    }

    #[test]
    fn test_duplicate_names_resolve_to_lowest_id() {
        let catalog = vec![checkpoint(22, "Acceso", 0), checkpoint(21, "Acceso", 0)];
        assert_eq!(resolve_checkpoint(&catalog, "Acceso").map(|c| c.id), Some(21));
    }

    #[test]
    fn test_sequence_index_overrides_id_order() {
        let ordered = order_checkpoints(vec![
            checkpoint(3, "C", 0),
            checkpoint(1, "A", 2),
            checkpoint(2, "B", 1),
        ]);
        let ids: Vec<i64> = ordered.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_sequence_falls_back_to_id() {
        let ordered = order_checkpoints(vec![checkpoint(7, "B", 0), checkpoint(5, "A", 0)]);
        let ids: Vec<i64> = ordered.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![5, 7]);
    }

    #[test]
    fn test_predecessor() {
        let ordered = vec![checkpoint(1, "A", 0), checkpoint(2, "B", 1), checkpoint(3, "C", 2)];
        assert!(predecessor(&ordered, 1).is_none());
        assert_eq!(predecessor(&ordered, 3).map(|c| c.id), Some(2));
        assert!(predecessor(&ordered, 99).is_none());
    }
}

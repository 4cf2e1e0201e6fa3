// src/db/reservations.rs
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::collections::{BTreeMap, HashMap};

use crate::domain::{Reservation, SlotLabel};
use crate::projector::ReservationError;

/// Store a reservation override. Returns false when the slot was already taken.
pub fn insert_reservation(conn: &Connection, r: &Reservation) -> Result<bool, ReservationError> {
    let changed = conn
        .execute(
            "insert or ignore into reservas_locales (nombre, horario, usuario, fecha) values (?, ?, ?, ?)",
            params![r.spot, r.slot.as_str(), r.user, r.created_at.timestamp()],
        )
        .map_err(|e| ReservationError::Store(format!("insert reservation failed: {e}")))?;
    Ok(changed == 1)
}

/// Remove a reservation override. Returns false when there was none.
pub fn delete_reservation(conn: &Connection, spot: &str, slot: SlotLabel) -> Result<bool, ReservationError> {
    let changed = conn
        .execute(
            "delete from reservas_locales where nombre = ? and horario = ?",
            params![spot, slot.as_str()],
        )
        .map_err(|e| ReservationError::Store(format!("delete reservation failed: {e}")))?;
    Ok(changed > 0)
}

pub fn list_reservations(conn: &Connection) -> Result<Vec<Reservation>, ReservationError> {
    let mut stmt = conn
        .prepare("select nombre, horario, usuario, fecha from reservas_locales order by fecha, nombre, horario")
        .map_err(|e| ReservationError::Store(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?, // nombre
                row.get::<_, String>(1)?, // horario
                row.get::<_, String>(2)?, // usuario
                row.get::<_, i64>(3)?,    // fecha
            ))
        })
        .map_err(|e| ReservationError::Store(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        let (spot, slot, user, fecha) = r.map_err(|e| ReservationError::Store(e.to_string()))?;
        let slot: SlotLabel = slot
            .parse()
            .map_err(|e| ReservationError::Store(format!("bad row for {spot}: {e}")))?;
        out.push(Reservation {
            spot,
            slot,
            user,
            created_at: from_unix(fecha)?,
        });
    }
    Ok(out)
}

/// Key-value view of the store: spot name -> slot label -> reserved flag.
pub fn reserved_slots(conn: &Connection) -> Result<HashMap<String, BTreeMap<SlotLabel, bool>>, ReservationError> {
    let mut map: HashMap<String, BTreeMap<SlotLabel, bool>> = HashMap::new();
    for r in list_reservations(conn)? {
        map.entry(r.spot).or_default().insert(r.slot, true);
    }
    Ok(map)
}

fn from_unix(secs: i64) -> Result<DateTime<Utc>, ReservationError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| ReservationError::Store(format!("bad timestamp {secs}")))
}

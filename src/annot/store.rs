use super::error::AnnotError;
use super::record::{CircleId, CircleRecord, DataPoint};
use std::collections::BTreeMap;

/// Authoritative set of circles for one document.
///
/// Records are keyed and iterated by ascending [`CircleId`]. Fresh ids come
/// from a high-water mark, so an id handed out once is never handed out again
/// until the store is wholesale replaced or cleared.
#[derive(Debug, Default)]
pub struct CircleStore {
    records: BTreeMap<CircleId, CircleRecord>,
    next_id: CircleId,
}

impl CircleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, id: CircleId) -> Option<&CircleRecord> {
        self.records.get(&id)
    }

    /// Insert a new circle and return its freshly assigned id. The center must
    /// be finite and the radius finite and positive.
    pub fn add(&mut self, x: f64, y: f64, r: f64) -> Result<CircleId, AnnotError> {
        let finite = x.is_finite() && y.is_finite() && r.is_finite();
        if !finite || r <= 0.0 {
            return Err(AnnotError::InvalidGeometry { x, y, r });
        }
        let id = self.next_id;
        self.records.insert(id, CircleRecord { id, x, y, r });
        self.next_id = id.next();
        Ok(id)
    }

    pub fn remove(&mut self, id: CircleId) -> Result<CircleRecord, AnnotError> {
        self.records.remove(&id).ok_or(AnnotError::NotFound(id))
    }

    /// Re-insert a previously removed record under its original id.
    pub fn restore(&mut self, record: CircleRecord) -> Result<(), AnnotError> {
        if self.records.contains_key(&record.id) {
            return Err(AnnotError::DuplicateId(record.id));
        }
        self.records.insert(record.id, record);
        if record.id >= self.next_id {
            self.next_id = record.id.next();
        }
        Ok(())
    }

    /// Id of the circle whose disk contains `p`; the highest id wins on overlap.
    pub fn find_at(&self, p: DataPoint) -> Option<CircleId> {
        self.records
            .values()
            .rev()
            .find(|rec| rec.contains(p))
            .map(|rec| rec.id)
    }

    pub fn list(&self) -> impl Iterator<Item = &CircleRecord> + '_ {
        self.records.values()
    }

    /// Wholesale replacement, keeping each record's id. Later duplicates of
    /// an id overwrite earlier ones.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = CircleRecord>) {
        self.records = records.into_iter().map(|rec| (rec.id, rec)).collect();
        self.next_id = self
            .records
            .keys()
            .next_back()
            .map_or(CircleId(0), |id| id.next());
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.next_id = CircleId(0);
    }
}

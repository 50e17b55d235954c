//! Heap storage for reference-typed values.
//!
//! There is no collector. Slots are reclaimed only through `free`, and a
//! freed slot is handed out again by the next `alloc`.

use super::dir::DirHandle;
use super::value::Value;

/// Handle to a heap-allocated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

#[derive(Debug)]
pub enum ManagedObject {
    List(Vec<Value>),
    Dir(Box<DirHandle>),
}

#[derive(Debug, Default)]
pub struct Heap {
    objects: Vec<Option<ManagedObject>>,
    free_list: Vec<usize>,
}

impl Heap {
    pub fn new() -> Self {
        Self {
            objects: Vec::with_capacity(64),
            free_list: Vec::new(),
        }
    }

    pub fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        if let Some(id) = self.free_list.pop() {
            self.objects[id] = Some(obj);
            ObjectId(id)
        } else {
            let id = self.objects.len();
            self.objects.push(Some(obj));
            ObjectId(id)
        }
    }

    /// Removes the object and recycles its slot. Any `ObjectId` still
    /// pointing at the slot sees `None` until the slot is reused.
    pub fn free(&mut self, id: ObjectId) -> Option<ManagedObject> {
        let obj = self.objects.get_mut(id.0)?.take()?;
        self.free_list.push(id.0);
        Some(obj)
    }

    pub fn get(&self, id: ObjectId) -> Option<&ManagedObject> {
        self.objects.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ManagedObject> {
        self.objects.get_mut(id.0)?.as_mut()
    }

    /// Live objects.
    pub fn len(&self) -> usize {
        self.objects.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Seeded array fixtures.
//!
//! Every fill is driven by a `ChaCha8Rng` seeded from a `u64`, so the same
//! seed always produces the same bytes on every platform.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stride_arena::StructArray;
use stride_core::{RecordLayout, ScalarType, Value};

use crate::{mixed_layout, vec3_layout, MixedFields, Vec3Fields};

fn random_value(rng: &mut ChaCha8Rng, ty: ScalarType) -> Value {
    match ty {
        ScalarType::I32 => Value::I32(rng.random()),
        ScalarType::U32 => Value::U32(rng.random()),
        ScalarType::F32 => Value::F32(rng.random_range(-1000.0..1000.0)),
        ScalarType::I64 => Value::I64(rng.random()),
        ScalarType::U64 => Value::U64(rng.random()),
        ScalarType::F64 => Value::F64(rng.random_range(-1.0e6..1.0e6)),
        ScalarType::Bool => Value::Bool(rng.random()),
    }
}

/// An owned array of `count` records of `layout`, every field random.
pub fn random_array(layout: Arc<RecordLayout>, count: usize, seed: u64) -> StructArray<'static> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let defs: Vec<_> = layout.fields().cloned().collect();
    StructArray::new(layout, count, |_, view| {
        for def in &defs {
            view.set_value(def, random_value(&mut rng, def.ty))?;
        }
        Ok(())
    })
    .expect("fixture sizes fit in memory")
}

/// `count` vec3 records where record `i` is `(i, 2i, 3i)`.
pub fn vec3_ramp(count: usize) -> StructArray<'static> {
    let layout = vec3_layout();
    let f = Vec3Fields::resolve(&layout).expect("vec3 fields");
    StructArray::new(layout, count, |i, view| {
        let i = i as f32;
        view.set(f.x, i)?;
        view.set(f.y, 2.0 * i)?;
        view.set(f.z, 3.0 * i)
    })
    .expect("fixture sizes fit in memory")
}

/// `count` random mixed records.
pub fn random_mixed(count: usize, seed: u64) -> StructArray<'static> {
    random_array(mixed_layout(), count, seed)
}

/// Sum of `a + c` over a mixed array, for order-independent checks.
pub fn mixed_checksum(array: &StructArray<'_>) -> i128 {
    let f = MixedFields::resolve(array.layout()).expect("mixed fields");
    (0..array.len())
        .map(|i| {
            let view = array.get(i).expect("index in range");
            let a = view.get(f.a).expect("field in range");
            let c = view.get(f.c).expect("field in range");
            i128::from(a) + i128::from(c)
        })
        .sum()
}

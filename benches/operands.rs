// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmark for the effective address resolution.
//!
//! Make sure the result of the benchmarked function is used,
//! whether by sending it to black_box, or to return it from the closure.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use m68000_disasm::addressing_modes::AddressingMode;
use m68000_disasm::instruction::Size;
use m68000_disasm::memory_access::MemoryIter;

pub fn criterion_benchmark(c: &mut Criterion) {
    let code = [0x12, 0x34, 0x56, 0x78];

    c.bench_function("resolve data register direct", |b| b.iter(|| {
        let mut memory_iter = MemoryIter::new(&code, 0);
        black_box(AddressingMode::resolve(black_box(0), black_box(3), Size::Word, &mut memory_iter).ok());
    }));

    c.bench_function("resolve index", |b| b.iter(|| {
        let mut memory_iter = MemoryIter::new(&code, 0);
        black_box(AddressingMode::resolve(black_box(6), black_box(3), Size::Word, &mut memory_iter).ok());
    }));

    c.bench_function("resolve absolute long", |b| b.iter(|| {
        let mut memory_iter = MemoryIter::new(&code, 0);
        black_box(AddressingMode::resolve(black_box(7), black_box(1), Size::Word, &mut memory_iter).ok());
    }));

    c.bench_function("resolve immediate long", |b| b.iter(|| {
        let mut memory_iter = MemoryIter::new(&code, 0);
        black_box(AddressingMode::resolve(black_box(7), black_box(4), Size::Long, &mut memory_iter).ok());
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

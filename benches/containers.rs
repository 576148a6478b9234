use bencher::{benchmark_group, benchmark_main, Bencher};

use roaring_containers::{ArrayContainer, BitmapContainer, Container, ShortIterable, ShortPeekable, ValueRange};

const SIZES: [usize; 4] = [1, 650, 6500, 65535];

fn arrays() -> Vec<Container> {
    SIZES.iter().map(|size| {
        let values: Vec<u16> = (0 .. *size as u16).collect();
        ArrayContainer::try_from(values).unwrap().into()
    }).collect()
}

fn bitmaps() -> Vec<Container> {
    SIZES.iter().map(|size| {
        BitmapContainer::from_range(ValueRange::new(0, *size as u32).unwrap()).into()
    }).collect()
}

fn array_next(bencher: &mut Bencher) { _bench_next(bencher, arrays()); }
fn bitmap_next(bencher: &mut Bencher) { _bench_next(bencher, bitmaps()); }
fn array_advance(bencher: &mut Bencher) { _bench_advance(bencher, arrays()); }
fn bitmap_advance(bencher: &mut Bencher) { _bench_advance(bencher, bitmaps()); }

fn bitmap_not(bencher: &mut Bencher) {
    let container: Container = (0 .. 20_000u16).filter(|x| x % 3 == 0).collect();
    let range = ValueRange::new(1_000, 50_000).unwrap();
    bencher.iter(|| container.not(range));
}

// walks every container to exhaustion, checking the count of values seen.
fn _bench_next(bencher: &mut Bencher, containers: Vec<Container>) {
    bencher.iter(|| {
        for container in containers.iter() {
            let mut iter = container.short_iter();
            let mut count = 0;
            while iter.has_next() {
                iter.next();
                count += 1;
            }
            assert_eq!(count, container.cardinality());
        }
    });
}

// seeks fresh cursors to each value in turn; every value is present.
fn _bench_advance(bencher: &mut Bencher, containers: Vec<Container>) {
    bencher.iter(|| {
        let mut diff = 0u16;
        for container in containers.iter() {
            let size = container.cardinality();
            for step in (0 .. size).step_by(61) {
                let target = step as u16;
                let mut iter = container.short_iter();
                iter.advance_if_needed(target);
                diff = diff.wrapping_add(iter.peek_next().unwrap_or(0).wrapping_sub(target));
            }
        }
        assert_eq!(diff, 0);
    });
}

benchmark_group!(benches, array_next, bitmap_next, array_advance, bitmap_advance, bitmap_not);
benchmark_main!(benches);

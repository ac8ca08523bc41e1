use std::hash::Hasher;
use wyhash_ex::{Bridge, SEED, Term, WyHashBuilder, WyHasher, bridge, hash, wyhash};

fn main() {
    env_logger::init();

    println!("=== wyhash_ex Examples ===\n");

    // Example 1: Hash bytes (one-shot)
    println!("1. Hashing byte slices with seed {}:", SEED);
    for data in [b"" as &[u8], b"abc", b"hello world"] {
        println!(
            "   wyhash({:?}) = 0x{:016x}",
            String::from_utf8_lossy(data),
            wyhash(data, SEED)
        );
    }
    println!();

    // Example 2: The host entry point
    println!("2. Calling {}.hash/1:", bridge::MODULE);
    let terms = [
        Term::from("abc"),
        Term::from("café"),
        Term::Charlist(vec![97, 0, 98]),
        Term::from("€"),
        Term::Integer(42),
        Term::from(&[b'x'; 4096][..]),
    ];
    for term in &terms {
        match hash(term) {
            Ok(value) => println!("   {} -> {}", term.kind(), value),
            Err(e) => println!("   {} -> {}", term.kind(), e),
        }
    }
    println!();

    // Example 3: Widening for narrower hosts
    println!("3. Representations of one result:");
    let value = Bridge::default().hash(&Term::from("abc")).unwrap();
    let (hi, lo) = value.hi_lo();
    println!("   u64   = {}", value.as_u64());
    println!("   i64   = {}", value.as_i64());
    println!("   hi/lo = 0x{:08x} / 0x{:08x}", hi, lo);
    println!();

    // Example 4: Embedded terminator vs exact bytes
    println!("4. Embedded NUL:");
    let bridge = Bridge::default();
    let truncated = bridge.hash(&Term::Charlist(vec![97, 0, 98])).unwrap();
    let exact = bridge.hash_exact(b"a\0b").unwrap();
    println!("   charlist [97, 0, 98] = 0x{:016x}", truncated.as_u64());
    println!("   exact b\"a\\0b\"       = 0x{:016x}", exact.as_u64());
    println!();

    // Example 5: Streaming hasher
    println!("5. Single write matches one-shot:");
    let mut hasher = WyHasher::new_with_seed(SEED);
    hasher.write(b"hello world");
    println!("   Matches one-shot: {}", hasher.finish() == wyhash(b"hello world", SEED));
    println!();

    // Example 6: Use with HashMap
    println!("6. Using with std::collections::HashMap:");
    use std::collections::HashMap;

    let mut map: HashMap<String, i32, WyHashBuilder> =
        HashMap::with_hasher(WyHashBuilder::with_seed(SEED));

    map.insert("foo".to_string(), 1);
    map.insert("bar".to_string(), 2);
    map.insert("baz".to_string(), 3);

    println!("   Created HashMap with WyHashBuilder");
    println!("   map['foo'] = {}", map.get("foo").unwrap());
}

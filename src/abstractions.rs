/*!

Types/type aliases that abstract over the implementing backing type.

The type context and the parser only ever hash short identifiers, for which FNV-1a is a good fit. Redirecting through
this module means the hash function can be swapped without touching the call sites:

```ignore
pub use std::collections::HashMap;
```

*/

pub use fnv::{FnvHashMap as HashMap, FnvHashSet as HashSet};

//! Built-in level used when no `--map` file is given.

pub const DEFAULT_LEVEL: &[&str] = &[
    "####################",
    "#..................#",
    "#..####............#",
    "#...........######.#",
    "#..........#.......#",
    "#..........#.......#",
    "#..........######..#",
    "#..................#",
    "#...#####..........#",
    "#..................#",
    "#..........######..#",
    "#..........#.......#",
    "#..........#.......#",
    "#...........######.#",
    "#..####............#",
    "#..................#",
    "####################",
];

//! Built-in demo mazes, easiest first.

/// A named text maze.
pub struct DemoMaze {
    /// Label used in logs.
    pub name: &'static str,
    /// Rows of the true maze.
    pub rows: &'static [&'static str],
}

/// Mazes run when no file is given on the command line.
pub const DEMOS: &[DemoMaze] = &[
    DemoMaze {
        name: "single-pit",
        rows: &[
            "XXXXXXX", //
            "X..G..X",
            "X.....X",
            "X..P..X",
            "X.....X",
            "X..@..X",
            "XXXXXXX",
        ],
    },
    DemoMaze {
        name: "easy",
        rows: &[
            "XXXXXX", //
            "X...GX",
            "X..PPX",
            "X....X",
            "X..P.X",
            "X@...X",
            "XXXXXX",
        ],
    },
    DemoMaze {
        name: "medium",
        rows: &[
            "XXXXXXXXX",
            "X..PGP..X",
            "X.......X",
            "X..P.P..X",
            "X.......X",
            "X..@....X",
            "XXXXXXXXX",
        ],
    },
    DemoMaze {
        name: "hard",
        rows: &[
            "XXXXXXXXX",
            "X..PG...X",
            "X.......X",
            "X.P.P.P.X",
            "XP.....PX",
            "X...@...X",
            "XXXXXXXXX",
        ],
    },
    DemoMaze {
        name: "pit-wall",
        rows: &[
            "XXXXXXXXXX",
            "X..PPP..GX",
            "X..PP....X",
            "X..P.....X",
            "X..P..P..X",
            "X@.P.....X",
            "X..P.....X",
            "X..P.....X",
            "X........X",
            "XXXXXXXXXX",
        ],
    },
];

//! Java source fixtures
//!
//! A small food-themed source set under `io.nanoapi.testfiles.food`.

use javagraph_ir::SourceFile;

pub const FOOD_PACKAGE: &str = "io.nanoapi.testfiles.food";

pub const FOOD: &str = "io/nanoapi/testfiles/food/Food.java";
pub const CONDIMENT: &str = "io/nanoapi/testfiles/food/Condiment.java";
pub const STEAK: &str = "io/nanoapi/testfiles/food/Steak.java";
pub const BURGER: &str = "io/nanoapi/testfiles/food/Burger.java";
pub const DOUBLEBURGER: &str = "io/nanoapi/testfiles/food/DoubleBurger.java";
pub const PEBBLE: &str = "io/nanoapi/testfiles/food/goron/Pebble.java";
pub const GENERIC_BURGER: &str = "io/nanoapi/testfiles/food/generic/Burger.java";

pub fn qn(simple: &str) -> String {
    format!("{}.{}", FOOD_PACKAGE, simple)
}

pub const FOOD_SRC: &str = r#"package io.nanoapi.testfiles.food;

public interface Food {
    double price();
}
"#;

pub const CONDIMENT_SRC: &str = r#"package io.nanoapi.testfiles.food;

public enum Condiment {
    KETCHUP,
    MUSTARD,
    MAYONNAISE;
}
"#;

pub const STEAK_SRC: &str = r#"package io.nanoapi.testfiles.food;

public class Steak implements Food {
    private static class Tapeworm {
        int length;
    }

    public double price() {
        return 25.0;
    }
}
"#;

pub const BURGER_SRC: &str = r#"package io.nanoapi.testfiles.food;

import java.util.List;
import java.util.ArrayList;

public class Burger<T> implements Food {
    public static int restaurantCount = 0;

    public static String advertisement() {
        return "Buy a burger!";
    }

    public double price() {
        return 2.0;
    }
}
"#;

/// Same qualified name as [`BURGER_SRC`], different shape
pub const GENERIC_BURGER_SRC: &str = r#"package io.nanoapi.testfiles.food;

public class Burger<T extends Burger<T>> implements Food {
    private T inner;

    public double price() {
        return inner == null ? 2.0 : 2.0 + inner.price() * 1.5;
    }
}
"#;

pub const DOUBLEBURGER_SRC: &str = r#"package io.nanoapi.testfiles.food;

import java.util.List;

public class DoubleBurger<T, U> extends Burger<T> {
    private List<Condiment> condiments;
    private U side;

    public DoubleBurger(List<Condiment> condiments) {
        this.condiments = condiments;
    }
}
"#;

pub const PEBBLE_SRC: &str = r#"package io.nanoapi.testfiles.food.goron;

import io.nanoapi.testfiles.food.Food;

public class Pebble implements Food {
    public class Sandworm {
        int segments;
    }

    public double price() {
        return 0.5;
    }
}
"#;

pub fn source(path: &str, text: &str) -> SourceFile {
    SourceFile::new(path, text)
}

/// The consistent source set: one `Burger`
pub fn food_source_set() -> Vec<SourceFile> {
    vec![
        source(FOOD, FOOD_SRC),
        source(CONDIMENT, CONDIMENT_SRC),
        source(STEAK, STEAK_SRC),
        source(BURGER, BURGER_SRC),
        source(DOUBLEBURGER, DOUBLEBURGER_SRC),
        source(PEBBLE, PEBBLE_SRC),
    ]
}

/// The source set with a second, conflicting `Burger`
pub fn conflicting_source_set() -> Vec<SourceFile> {
    let mut files = food_source_set();
    files.push(source(GENERIC_BURGER, GENERIC_BURGER_SRC));
    files
}

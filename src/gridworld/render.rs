//! Text views of the grid for human inspection

use super::{
    config::GridConfig,
    env::GridWorld,
    position::{Action, Position},
};

/// Render the grid with the agent's current position.
///
/// Rows are printed top to bottom (`y = 0` first). Each cell is two characters
/// wide: `" ."` empty, `" S"` start, `" G"` goal, `" A"` agent, `" X"` obstacle.
pub fn render_ascii(env: &GridWorld) -> String {
    let config = env.config();
    let agent = env.position();
    rows(config, |position| {
        let glyph = if config.is_obstacle(position) {
            " X"
        } else if position == agent {
            " A"
        } else if position == config.start {
            " S"
        } else if position == config.goal {
            " G"
        } else {
            " ."
        };
        glyph.to_string()
    })
}

/// Render the greedy policy as a map of arrows.
///
/// `greedy` is asked for the action at every open cell other than start and
/// goal, in row-major order.
pub fn render_policy<F>(config: &GridConfig, mut greedy: F) -> String
where
    F: FnMut(usize) -> Action,
{
    rows(config, |position| {
        if config.is_obstacle(position) {
            " X ".to_string()
        } else if position == config.goal {
            " G ".to_string()
        } else if position == config.start {
            " S ".to_string()
        } else {
            let state = position.x + position.y * config.width;
            format!(" {} ", greedy(state).arrow())
        }
    })
}

fn rows<F>(config: &GridConfig, mut cell: F) -> String
where
    F: FnMut(Position) -> String,
{
    (0..config.height)
        .map(|y| {
            (0..config.width)
                .map(|x| cell(Position::new(x, y)))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ascii_initial() {
        let env = GridWorld::new(GridConfig::new(3, 2).with_obstacle((1, 0))).unwrap();
        assert_eq!(render_ascii(&env), " A X .\n . . G");
    }

    #[test]
    fn test_render_ascii_after_move() {
        let mut env = GridWorld::new(GridConfig::new(3, 2)).unwrap();
        env.step(Action::Down);
        assert_eq!(render_ascii(&env), " S . .\n A . G");
    }

    #[test]
    fn test_render_policy_marks_cells() {
        let config = GridConfig::new(3, 2).with_obstacle((1, 1));
        let policy = render_policy(&config, |state| {
            if state == 2 { Action::Down } else { Action::Right }
        });
        assert_eq!(policy, " S  >  v \n >  X  G ");
    }
}

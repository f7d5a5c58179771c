//! Declarative command tables
//!
//! Overloads of one command are listed most specific first: the resolver
//! takes the first overload that matches.

use crate::command::expansions::*;
use crate::command::port_rules::*;
use crate::command::{PortRule, ReplaceRule, VariableExtractor};

/// One row of a command table
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
    pub replace: Option<ReplaceRule>,
    pub port: Option<PortRule>,
    pub defined_vars: Option<VariableExtractor>,
}

impl CommandSpec {
    pub fn new(name: &'static str, args: &'static str, description: &'static str) -> Self {
        Self {
            name,
            args,
            description,
            replace: None,
            port: None,
            defined_vars: None,
        }
    }

    /// Shorthand expanded through `{n}` templates
    pub fn patterns(mut self, patterns: &'static [&'static str]) -> Self {
        self.replace = Some(ReplaceRule::Patterns(patterns));
        self
    }

    /// Shorthand expanded by a function
    pub fn expand(mut self, expand: fn(&[String]) -> Vec<String>) -> Self {
        self.replace = Some(ReplaceRule::Expand(expand));
        self
    }

    pub fn port(mut self, rule: PortRule) -> Self {
        self.port = Some(rule);
        self
    }

    pub fn defines(mut self, extract: VariableExtractor) -> Self {
        self.defined_vars = Some(extract);
        self
    }
}

fn cmd(name: &'static str, args: &'static str, description: &'static str) -> CommandSpec {
    CommandSpec::new(name, args, description)
}

/// Commands of the base dialect plus the extended shorthands
pub fn base_table() -> Vec<CommandSpec> {
    vec![
        cmd("read", "output:*number building:building index:number", "Reads a number from a memory cell."),
        cmd("write", "value:number building:building index:number", "Writes a number to a memory cell."),
        // draw
        cmd("draw", "clear r:number g:number b:number", "Clears the display.")
            .port(remove_zero_padding),
        cmd("draw", "color r:number g:number b:number a:number?=255", "Sets the draw color.")
            .port(remove_zero_padding),
        cmd("draw", "col color:number", "Sets the draw color from a packed color.")
            .port(remove_zero_padding),
        cmd("draw", "stroke width:number", "Sets the line width.").port(remove_zero_padding),
        cmd("draw", "line x1:number y1:number x2:number y2:number", "Draws a line.")
            .port(remove_zero_padding),
        cmd("draw", "rect x:number y:number width:number height:number", "Draws a filled rectangle.")
            .port(remove_zero_padding),
        cmd("draw", "lineRect x:number y:number width:number height:number", "Draws a rectangle outline.")
            .port(remove_zero_padding),
        cmd(
            "draw",
            "poly x:number y:number sides:number radius:number rotation:number?=0",
            "Draws a filled regular polygon.",
        )
        .port(remove_zero_padding),
        cmd(
            "draw",
            "linePoly x:number y:number sides:number radius:number rotation:number?=0",
            "Draws a regular polygon outline.",
        )
        .port(remove_zero_padding),
        cmd(
            "draw",
            "triangle x1:number y1:number x2:number y2:number x3:number y3:number",
            "Draws a filled triangle.",
        )
        .port(remove_zero_padding),
        cmd(
            "draw",
            "image x:number y:number image:type size:number rotation:number?=0",
            "Draws the icon of a content type.",
        )
        .port(remove_zero_padding),
        // text and links
        cmd("print", "message:any", "Appends to the text buffer."),
        cmd("printf", "message:string", "Prints a string, interpolating {variable} references.")
            .expand(expand_printf),
        cmd("drawflush", "target:building", "Flushes the draw buffer to a display."),
        cmd("printflush", "target:building", "Flushes the text buffer to a message block."),
        cmd("getlink", "output:*building index:number", "Gets a linked building by index."),
        // control
        cmd("control", "enabled building:building enabled:boolean", "Enables or disables a building.")
            .port(remove_zero_padding),
        cmd(
            "control",
            "shoot building:building x:number y:number shoot:boolean",
            "Makes a turret shoot at a position.",
        )
        .port(remove_zero_padding),
        cmd(
            "control",
            "shootp building:building unit:unit shoot:boolean",
            "Makes a turret shoot at a unit.",
        )
        .port(remove_zero_padding),
        cmd("control", "config building:building config:any", "Configures a building.")
            .port(remove_zero_padding),
        cmd("control", "color building:building color:number", "Sets an illuminator color.")
            .port(remove_zero_padding),
        // radar and sensor
        cmd(
            "radar",
            "target1:targetClass target2:targetClass target3:targetClass sort:unitSortCriteria turret:building sortOrder:number output:*unit",
            "Finds units near a building.",
        )
        .port(port_radar),
        cmd(
            "radar",
            "target:targetClass sort:unitSortCriteria turret:building sortOrder:number output:*unit",
            "Finds units near a building, with one filter.",
        )
        .patterns(&["radar {1} any any {2} {3} {4} {5}"]),
        cmd("sensor", "output:*any target:any property:senseable", "Reads a property of a building or unit.")
            .port(port_sensor)
            .defines(sensor_defined),
        cmd("sensor", "path:sensorPath", "Reads `building.property` into a variable of the same name.")
            .expand(expand_sensor_path),
        // set and op
        cmd("set", "variable:*any value:any", "Sets a variable.").defines(set_defined),
        cmd("set", "variable:typedVariable value:any", "Declares a typed variable.")
            .expand(expand_typed_set)
            .defines(typed_set_defined),
        cmd(
            "set",
            "variable:*any left:any operator:operatorSymbol right:any",
            "Sets a variable to the result of an infix operation.",
        )
        .expand(expand_set_operation),
        cmd(
            "op",
            "operation:operationBinary output:*number left:number right:number",
            "Performs a binary operation.",
        )
        .port(port_binary_op),
        cmd(
            "op",
            "operation:operationUnary output:*number value:number",
            "Performs a unary operation.",
        ),
        cmd(
            "op",
            "operation:operationBinary output:*number right:number",
            "Applies a binary operation to a variable in place.",
        )
        .patterns(&["op {1} {2} {2} {3}"]),
        cmd("lookup", "type:lookupType output:*type index:number", "Looks up content by its id.")
            .defines(lookup_defined),
        cmd(
            "packcolor",
            "output:*number r:number g:number b:number a:number",
            "Packs a color into a single number.",
        ),
        // flow control
        cmd("wait", "seconds:number", "Waits for a number of seconds."),
        cmd("stop", "", "Halts the processor."),
        cmd("end", "", "Jumps back to the first instruction."),
        cmd("noop", "", "Does nothing."),
        cmd("jump", "target:jumpAddress always", "Jumps unconditionally."),
        cmd(
            "jump",
            "target:jumpAddress condition:operandTest left:any right:any",
            "Jumps if a condition holds.",
        )
        .port(port_jump),
        cmd(
            "jump",
            "target:jumpAddress left:any operator:comparisonSymbol right:any",
            "Jumps if an infix comparison holds.",
        )
        .expand(expand_jump_comparison),
        // units
        cmd("ubind", "type:unitType", "Binds the next unit of a type."),
        cmd("ucontrol", "idle", "Stops moving but keeps building or mining.")
            .port(remove_zero_padding),
        cmd("ucontrol", "stop", "Stops all unit actions.").port(remove_zero_padding),
        cmd("ucontrol", "move x:number y:number", "Moves to a position.").port(remove_zero_padding),
        cmd("ucontrol", "approach x:number y:number radius:number", "Approaches a position.")
            .port(remove_zero_padding),
        cmd("ucontrol", "pathfind x:number y:number", "Pathfinds to a position.")
            .port(remove_zero_padding),
        cmd("ucontrol", "autoPathfind", "Pathfinds to the nearest enemy core or spawn.")
            .port(remove_zero_padding),
        cmd("ucontrol", "boost enable:boolean", "Starts or stops boosting.")
            .port(remove_zero_padding),
        cmd("ucontrol", "target x:number y:number shoot:boolean", "Shoots at a position.")
            .port(remove_zero_padding),
        cmd("ucontrol", "targetp unit:unit shoot:boolean", "Shoots at a unit.")
            .port(remove_zero_padding),
        cmd("ucontrol", "itemDrop to:building amount:number", "Drops items into a building.")
            .port(remove_zero_padding),
        cmd(
            "ucontrol",
            "itemTake from:building item:itemType amount:number",
            "Takes items from a building.",
        )
        .port(remove_zero_padding),
        cmd("ucontrol", "payDrop", "Drops the current payload.").port(remove_zero_padding),
        cmd("ucontrol", "payTake takeUnits:boolean", "Picks up a payload.")
            .port(remove_zero_padding),
        cmd("ucontrol", "payEnter", "Enters the building below.").port(remove_zero_padding),
        cmd("ucontrol", "mine x:number y:number", "Mines an ore tile.").port(remove_zero_padding),
        cmd("ucontrol", "flag value:number", "Sets the unit flag.").port(remove_zero_padding),
        cmd(
            "ucontrol",
            "build x:number y:number block:buildingType rotation:number config:any",
            "Builds a block.",
        )
        .port(remove_zero_padding),
        cmd(
            "ucontrol",
            "getBlock x:number y:number type:*buildingType building:*building floor:*any",
            "Reads the block at a position.",
        )
        .port(remove_zero_padding),
        cmd(
            "ucontrol",
            "within x:number y:number radius:number result:*boolean",
            "Checks whether the unit is near a position.",
        )
        .port(remove_zero_padding),
        cmd("ucontrol", "unbind", "Releases the unit to its default AI.")
            .port(remove_zero_padding),
        cmd(
            "uradar",
            "target1:targetClass target2:targetClass target3:targetClass sort:unitSortCriteria unused:number sortOrder:number output:*unit",
            "Finds units near the bound unit.",
        )
        .port(port_uradar),
        cmd(
            "uradar",
            "target:targetClass sort:unitSortCriteria sortOrder:number output:*unit",
            "Finds units near the bound unit, with one filter.",
        )
        .patterns(&["uradar {1} any any {2} 0 {3} {4}"]),
        cmd(
            "ulocate",
            "find:locateType group:buildingGroup enemy:boolean ore:itemType outX:*number outY:*number found:*boolean building:*building",
            "Locates a building, ore or spawn.",
        )
        .defines(ulocate_defined),
        // world
        cmd("setrule", "rule:teamRule value:number team:team", "Sets a team rule."),
        cmd("setrule", "rule:ruleName value:number", "Sets a global rule."),
        cmd("setrule", "rule:teamRule team:team value:number", "Sets a team rule, legacy order.")
            .port(port_legacy_setrule),
        cmd("getblock", "floor output:*buildingType x:number y:number", "Reads the floor at a position."),
        cmd("getblock", "ore output:*buildingType x:number y:number", "Reads the ore at a position."),
        cmd("getblock", "block output:*buildingType x:number y:number", "Reads the block type at a position."),
        cmd("getblock", "building output:*building x:number y:number", "Reads the building at a position."),
        cmd("setblock", "floor to:any x:number y:number", "Replaces the floor at a position."),
        cmd("setblock", "ore to:any x:number y:number", "Replaces the ore at a position."),
        cmd(
            "setblock",
            "block to:buildingType x:number y:number team:team rotation:number",
            "Places a block at a position.",
        ),
        cmd(
            "spawn",
            "type:unitType x:number y:number rotation:number team:team output:*unit",
            "Spawns a unit.",
        ),
        cmd(
            "status",
            "false effect:statusEffect unit:unit duration:number",
            "Applies a status effect to a unit.",
        ),
        cmd("status", "true effect:statusEffect unit:unit", "Clears a status effect from a unit."),
        cmd("spawnwave", "x:number y:number natural:boolean", "Spawns a wave."),
        cmd(
            "explosion",
            "team:team x:number y:number radius:number damage:number air:boolean ground:boolean pierce:boolean",
            "Creates an explosion.",
        ),
        cmd("setrate", "ipt:number", "Sets the instructions executed per tick."),
        cmd("fetch", "unit output:*unit team:team index:number", "Gets a unit of a team by index."),
        cmd("fetch", "unitCount output:*number team:team", "Counts the units of a team."),
        cmd("fetch", "player output:*unit team:team index:number", "Gets a player unit of a team by index."),
        cmd("fetch", "playerCount output:*number team:team", "Counts the players of a team."),
        cmd("fetch", "core output:*building team:team index:number", "Gets a core of a team by index."),
        cmd("fetch", "coreCount output:*number team:team", "Counts the cores of a team."),
        cmd(
            "fetch",
            "build output:*building team:team index:number block:buildingType",
            "Gets a building of a team and type by index.",
        ),
        cmd(
            "fetch",
            "buildCount output:*number team:team block:buildingType",
            "Counts the buildings of a team and type.",
        ),
        cmd("getflag", "output:*boolean flag:string", "Reads a global flag."),
        cmd("setflag", "flag:string value:boolean", "Sets a global flag."),
        cmd("message", "notify", "Shows the text buffer as a notification."),
        cmd("message", "mission", "Shows the text buffer as the mission text."),
        cmd("message", "announce duration:number", "Shows the text buffer as an announcement."),
        cmd("message", "toast duration:number", "Shows the text buffer as a toast."),
        cmd("cutscene", "pan x:number y:number speed:number", "Pans the player camera."),
        cmd("cutscene", "zoom level:number", "Zooms the player camera."),
        cmd("cutscene", "stop", "Returns camera control to the player."),
    ]
}

/// Directives evaluated at compile time; never emitted
pub fn compiler_table() -> Vec<CommandSpec> {
    vec![
        cmd("namespace", "name:variable", "Prefixes variables in the block with the namespace name."),
        cmd(
            "&for",
            "variable:variable in lower:number upper:number",
            "Repeats the block for each integer in an inclusive range.",
        ),
        cmd(
            "&for",
            "variable:variable of ...elements:any",
            "Repeats the block for each listed value.",
        ),
        cmd(
            "&if",
            "left:any operator:comparisonSymbol right:any",
            "Keeps the block if the comparison holds.",
        ),
        cmd("&if", "value:any", "Keeps the block if the value is truthy."),
    ]
}

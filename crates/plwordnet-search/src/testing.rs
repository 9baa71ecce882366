//! Small graph shared by the engine tests

use plwordnet_core::{LoadOptions, Wordnet};

const FIXTURE: &str = r###"<array-list>
  <lexical-unit id="1" name="kot" pos="rzeczownik" variant="1"/>
  <lexical-unit id="2" name="kotek" pos="rzeczownik" variant="1"/>
  <lexical-unit id="3" name="szkot" pos="rzeczownik" variant="1"/>
  <lexical-unit id="4" name="kotwica" pos="rzeczownik" variant="1"/>
  <lexical-unit id="5" name="kotłować" pos="czasownik" variant="1"/>
  <lexical-unit id="6" name="cat" pos="rzeczownik pwn" variant="1"/>
  <lexical-unit id="7" name="Kot" pos="rzeczownik" variant="2"/>
  <lexical-unit id="8" name="pies" pos="rzeczownik" variant="1"/>
  <synset id="100"><unit-id>1</unit-id><unit-id>6</unit-id></synset>
  <synset id="101"><unit-id>2</unit-id></synset>
  <synset id="102"><unit-id>3</unit-id></synset>
  <synset id="103"><unit-id>4</unit-id></synset>
  <synset id="104"><unit-id>5</unit-id></synset>
  <synset id="105"><unit-id>7</unit-id></synset>
  <synset id="106"><unit-id>8</unit-id></synset>
</array-list>"###;

pub fn wordnet() -> Wordnet {
    Wordnet::load(FIXTURE.as_bytes(), &LoadOptions::default()).unwrap()
}
